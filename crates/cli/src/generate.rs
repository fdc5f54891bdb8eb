use kwire_api::{Anchor, AnchorKind, MethodInfo, ServiceInfo};
use kwire_core::{BoxError, GenerationOptions, GeneratorConfig, Result, StubGenerator, StubWriter};
use serde::Serialize;
use tracing::info;

/// Describes one bound `(service, anchor)` pair as JSON instead of code.
pub struct DescriptorGenerator;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Descriptor<'a> {
    kind: AnchorKind,
    package_name: &'a str,
    impl_class_name: String,
    extends: &'a str,
    interface_fqn: &'a str,
    service_name: &'a str,
    generate_factory: bool,
    obfuscated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    debug: Option<&'a ServiceInfo>,
    methods: &'a [MethodInfo],
}

impl<A: Anchor> StubGenerator<A> for DescriptorGenerator {
    fn generate(
        &self,
        service: &ServiceInfo,
        anchor: &A,
        options: &GenerationOptions,
    ) -> std::result::Result<String, BoxError> {
        service.validate()?;
        let descriptor = Descriptor {
            kind: anchor.kind(),
            package_name: anchor.package_name(),
            impl_class_name: anchor.impl_class_name(),
            extends: anchor.abstract_class_name(),
            interface_fqn: anchor.interface_fqn(),
            service_name: anchor
                .explicit_service_name()
                .unwrap_or(&service.service_name),
            generate_factory: anchor.generate_factory(),
            obfuscated: options.obfuscation_enabled,
            debug: options.generate_debug_info.then_some(service),
            methods: &service.methods,
        };
        Ok(serde_json::to_string_pretty(&descriptor)?)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

pub fn run(config: &GeneratorConfig) -> Result<()> {
    let analysis = crate::analyzer().run(config)?;
    let writer = StubWriter::new(&config.output_dir, config.generation_options());
    let report = writer.generate(&analysis, &DescriptorGenerator, &DescriptorGenerator)?;
    info!(
        "Wrote {} descriptors to {}",
        report.written.len(),
        writer.output_dir().display()
    );
    for path in &report.written {
        println!("{}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kwire_api::{ClientAnchorInfo, ParamInfo};

    fn service() -> ServiceInfo {
        ServiceInfo {
            service_name: "UserSvc".to_string(),
            package_name: "com.x".to_string(),
            interface_name: "UserApi".to_string(),
            methods: vec![MethodInfo {
                rpc_method_id: "1".to_string(),
                method_name: "get".to_string(),
                parameters: vec![ParamInfo {
                    name: "id".to_string(),
                    ty: "kotlin.String".to_string(),
                }],
                return_type: "com.x.model.User".to_string(),
                is_streaming: false,
            }],
        }
    }

    #[test]
    fn test_descriptor_uses_override_and_options() {
        let anchor = ClientAnchorInfo {
            package_name: "com.x.client".to_string(),
            abstract_class_name: "UserClient".to_string(),
            interface_fqn: "com.x.UserApi".to_string(),
            explicit_service_name: Some("Users".to_string()),
            generate_factory: false,
        };
        let options = GenerationOptions {
            obfuscation_enabled: false,
            generate_debug_info: false,
        };
        let text = DescriptorGenerator
            .generate(&service(), &anchor, &options)
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json["kind"], "client");
        assert_eq!(json["implClassName"], "UserClientImpl");
        assert_eq!(json["serviceName"], "Users");
        assert_eq!(json["obfuscated"], false);
        assert_eq!(json["methods"][0]["parameters"][0]["type"], "kotlin.String");
        assert!(json.get("debug").is_none());
        assert_eq!(
            <DescriptorGenerator as StubGenerator<ClientAnchorInfo>>::file_extension(
                &DescriptorGenerator
            ),
            "json"
        );
    }
}
