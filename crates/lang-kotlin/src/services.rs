use crate::patterns::{METHOD, RETURN_TYPE, SERVICE_HEADER};
use crate::types::{clean_type, parameter_name, strip_default_value};
use kwire_api::{MarkerTable, MethodInfo, ParamInfo, ServiceInfo};
use kwire_core::scan::{closing_paren, split_top_level_commas};
use kwire_core::{KwireError, Result, TypeQualifier};
use regex::Captures;
use tracing::debug;

const IMPLICIT_RETURN: &str = "Unit";

struct Header {
    start: usize,
    service_name: String,
    interface_name: String,
}

/// Extracts every `@RpcService` interface of a file with its `@RpcMethod`s.
///
/// A method belongs to the closest service header before it; methods that
/// precede every header go to the first service.
pub fn extract_services(
    source: &str,
    qualifier: &TypeQualifier<'_>,
    markers: &MarkerTable,
) -> Result<Vec<ServiceInfo>> {
    let headers: Vec<Header> = SERVICE_HEADER
        .captures_iter(source)
        .filter_map(|caps| {
            Some(Header {
                start: caps.get(0)?.start(),
                service_name: caps.name("route")?.as_str().to_string(),
                interface_name: caps.name("name")?.as_str().to_string(),
            })
        })
        .collect();
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let mut services: Vec<ServiceInfo> = headers
        .iter()
        .map(|h| ServiceInfo {
            service_name: h.service_name.clone(),
            package_name: qualifier.package().to_string(),
            interface_name: h.interface_name.clone(),
            methods: Vec::new(),
        })
        .collect();

    for caps in METHOD.captures_iter(source) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let owner = headers
            .iter()
            .rposition(|h| h.start <= whole.start())
            .unwrap_or(0);
        let method = parse_method(source, &caps, whole.end() - 1, qualifier, markers)?;
        debug!(
            "  {}.{} -> {}",
            services[owner].interface_name, method.method_name, method.return_type
        );
        services[owner].methods.push(method);
    }

    Ok(services)
}

/// `open` is the offset of the `(` that starts the parameter list.
fn parse_method(
    source: &str,
    caps: &Captures<'_>,
    open: usize,
    qualifier: &TypeQualifier<'_>,
    markers: &MarkerTable,
) -> Result<MethodInfo> {
    let group = |name: &str| caps.name(name).map_or("", |m| m.as_str());

    let Some(close) = closing_paren(source, open) else {
        let rest = &source[open..];
        let line = rest.lines().next().unwrap_or(rest);
        return Err(KwireError::MalformedParameter {
            fragment: line.trim().to_string(),
        });
    };
    let parameters = parse_params(&source[open + 1..close], qualifier)?;
    let raw_return = RETURN_TYPE
        .captures(&source[close + 1..])
        .and_then(|c| c.name("ret"))
        .map(|m| clean_type(m.as_str()))
        .unwrap_or_default();
    let return_type = if raw_return.is_empty() {
        qualifier.qualify(IMPLICIT_RETURN)
    } else {
        qualifier.qualify(&raw_return)
    };
    let is_streaming = markers.is_streaming(&return_type);

    Ok(MethodInfo {
        rpc_method_id: group("id").to_string(),
        method_name: group("name").to_string(),
        parameters,
        return_type,
        is_streaming,
    })
}

/// Splits a parameter block into `(name, qualified type)` pairs.
///
/// An entry without a `name: Type` separator fails the whole pass.
pub fn parse_params(block: &str, qualifier: &TypeQualifier<'_>) -> Result<Vec<ParamInfo>> {
    let mut params = Vec::new();
    for entry in split_top_level_commas(block) {
        if entry.is_empty() {
            continue;
        }
        let Some((name, raw_type)) = entry.split_once(':') else {
            return Err(KwireError::MalformedParameter { fragment: entry });
        };
        let name = parameter_name(name);
        let ty = clean_type(strip_default_value(raw_type));
        if name.is_empty() || ty.is_empty() {
            return Err(KwireError::MalformedParameter { fragment: entry });
        }
        params.push(ParamInfo {
            name: name.to_string(),
            ty: qualifier.qualify(&ty),
        });
    }
    Ok(params)
}
