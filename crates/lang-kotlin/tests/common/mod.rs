use kwire_core::{Analyzer, GeneratorConfig, SourceSet};
use kwire_kotlin::KotlinDialect;
use std::fs;
use std::path::Path;
use std::sync::Arc;

#[allow(dead_code)]
pub fn analyzer() -> Analyzer {
    Analyzer::new(Arc::new(KotlinDialect::new()))
}

#[allow(dead_code)]
pub fn source_set(files: Vec<(&str, &str)>) -> SourceSet {
    SourceSet::from_sources(files)
}

/// Writes `files` below `root`, creating parent directories.
#[allow(dead_code)]
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

/// Config pointing at `root/{api,client,server}` with output in `root/out`.
#[allow(dead_code)]
pub fn config_for(root: &Path) -> GeneratorConfig {
    GeneratorConfig {
        api_source_path: root.join("api"),
        client_source_path: root.join("client"),
        server_source_path: root.join("server"),
        output_dir: root.join("out"),
        ..Default::default()
    }
}
