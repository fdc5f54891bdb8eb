use kwire_core::{GeneratorConfig, Result};

pub fn run(config: &GeneratorConfig) -> Result<()> {
    let analysis = crate::analyzer().run(config)?;
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}
