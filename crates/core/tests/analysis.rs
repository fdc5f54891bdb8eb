use kwire_api::{ClientAnchorInfo, MarkerTable, MethodInfo, ServerAnchorInfo, ServiceInfo};
use kwire_core::{
    AnalysisInput, Analyzer, DeclarationKind, FileContext, PackageFilter, Result, SourceDialect,
    SourceSet, TypeQualifier, Warning,
};
use std::sync::Arc;

/// Line-oriented toy language:
/// `package p`, `import a.B`, `type T`, `service Iface route`, `method id name Ret`,
/// `client Class Iface`.
struct LineDialect {
    markers: MarkerTable,
}

impl LineDialect {
    fn new() -> Self {
        Self {
            markers: MarkerTable::new()
                .with_package("lang", &["Text"])
                .with_stream("Stream", "lang.Stream"),
        }
    }
}

fn words<'a>(source: &'a str, keyword: &'a str) -> impl Iterator<Item = Vec<&'a str>> + 'a {
    source.lines().filter_map(move |line| {
        let parts: Vec<&str> = line.split_whitespace().collect();
        (parts.first() == Some(&keyword)).then(|| parts[1..].to_vec())
    })
}

impl SourceDialect for LineDialect {
    fn default_extensions(&self) -> &[&str] {
        &["ln"]
    }

    fn extract_context(&self, source: &str) -> FileContext {
        let package = words(source, "package")
            .next()
            .and_then(|w| w.first().map(|p| p.to_string()))
            .unwrap_or_default();
        let mut ctx = FileContext::new(package);
        for w in words(source, "import") {
            ctx.record_import(w[0], w.get(2).copied());
        }
        ctx
    }

    fn top_level_types(&self, source: &str) -> Vec<String> {
        words(source, "type").map(|w| w[0].to_string()).collect()
    }

    fn marker_types(&self) -> &MarkerTable {
        &self.markers
    }

    fn annotation_for(&self, kind: DeclarationKind) -> &str {
        match kind {
            DeclarationKind::Service => "service",
            DeclarationKind::ClientAnchor => "client",
            DeclarationKind::ServerAnchor => "server",
        }
    }

    fn extract_services(
        &self,
        source: &str,
        qualifier: &TypeQualifier<'_>,
    ) -> Result<Vec<ServiceInfo>> {
        let mut services: Vec<ServiceInfo> = words(source, "service")
            .map(|w| ServiceInfo {
                service_name: w[1].to_string(),
                package_name: qualifier.package().to_string(),
                interface_name: w[0].to_string(),
                methods: Vec::new(),
            })
            .collect();
        if let Some(svc) = services.first_mut() {
            for w in words(source, "method") {
                let return_type = qualifier.qualify(w[2]);
                svc.methods.push(MethodInfo {
                    rpc_method_id: w[0].to_string(),
                    method_name: w[1].to_string(),
                    parameters: Vec::new(),
                    is_streaming: self.markers.is_streaming(&return_type),
                    return_type,
                });
            }
        }
        Ok(services)
    }

    fn extract_client_anchors(
        &self,
        source: &str,
        qualifier: &TypeQualifier<'_>,
    ) -> Vec<ClientAnchorInfo> {
        words(source, "client")
            .map(|w| ClientAnchorInfo {
                package_name: qualifier.package().to_string(),
                abstract_class_name: w[0].to_string(),
                interface_fqn: qualifier.qualify(w[1]),
                explicit_service_name: None,
                generate_factory: true,
            })
            .collect()
    }

    fn extract_server_anchors(
        &self,
        _source: &str,
        _qualifier: &TypeQualifier<'_>,
    ) -> Vec<ServerAnchorInfo> {
        Vec::new()
    }
}

fn analyzer() -> Analyzer {
    Analyzer::new(Arc::new(LineDialect::new()))
}

#[test]
fn index_is_complete_before_qualification() {
    // `a.ln` sorts first but references a type declared in `z.ln`.
    let api = SourceSet::from_sources(vec![
        ("a.ln", "package svc\nservice Api api\nmethod 1 load Stream<Item>\n"),
        ("z.ln", "package model\ntype Item\n"),
    ]);

    let services = analyzer().parse_services(&api).unwrap();
    let method = &services[0].methods[0];
    assert_eq!(method.return_type, "lang.Stream<model.Item>");
    assert!(method.is_streaming);
}

#[test]
fn results_follow_file_order() {
    let api = SourceSet::from_sources(vec![
        ("b.ln", "package p\nservice B b\n"),
        ("a.ln", "package p\nservice A a\n"),
        ("c.ln", "package p\nservice C c\n"),
    ]);

    let services = analyzer().parse_services(&api).unwrap();
    let names: Vec<_> = services.iter().map(|s| s.interface_name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn duplicate_services_are_reported() {
    let input = AnalysisInput {
        api: SourceSet::from_sources(vec![
            ("one.ln", "package p\nservice Api first\n"),
            ("two.ln", "package p\nservice Api second\n"),
        ]),
        ..Default::default()
    };

    let analysis = analyzer().analyze(&input).unwrap();
    assert!(analysis.warnings.contains(&Warning::DuplicateService {
        fqn: "p.Api".to_string()
    }));
    assert_eq!(
        analysis.catalog().get("p.Api").map(|s| s.service_name.as_str()),
        Some("second")
    );
}

#[test]
fn empty_anchor_set_warns_with_hint() {
    let input = AnalysisInput {
        api: SourceSet::from_sources(vec![("api.ln", "package p\nservice Api api\n")]),
        client: Some(SourceSet::from_sources(vec![(
            "client.ln",
            "package c\n# client Broken\n",
        )])),
        server: None,
    };

    let analysis = analyzer().analyze(&input).unwrap();
    assert!(analysis.client_anchors.is_empty());
    match analysis.warnings.as_slice() {
        [Warning::NoDeclarations { kind, files }] => {
            assert_eq!(*kind, DeclarationKind::ClientAnchor);
            assert!(files[0].mentions_annotation);
        }
        other => panic!("unexpected warnings: {other:?}"),
    }
}

#[test]
fn package_filter_applies_to_all_declarations() {
    let input = AnalysisInput {
        api: SourceSet::from_sources(vec![
            ("a.ln", "package com.pub\nservice Open open\n"),
            ("b.ln", "package com.pub.internal\nservice Hidden hidden\n"),
        ]),
        client: Some(SourceSet::from_sources(vec![(
            "c.ln",
            "package com.pub.internal\nimport com.pub.internal.Hidden\nclient HiddenClient Hidden\n",
        )])),
        server: None,
    };

    let filter = PackageFilter::new(Vec::new(), vec!["com.pub.internal".to_string()]);
    let analysis = analyzer().with_package_filter(filter).analyze(&input).unwrap();
    assert_eq!(analysis.services.len(), 1);
    assert!(analysis.client_anchors.is_empty());
}
