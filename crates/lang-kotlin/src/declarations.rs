use crate::patterns::TYPE_DECL;
use kwire_core::scan::DepthTracker;

/// Simple names of the class/interface/object declarations at brace depth 0.
///
/// Nested and local types are not importable by simple name from other
/// files, so they stay out of the symbol index.
pub fn top_level_types(source: &str) -> Vec<String> {
    let mut depth = DepthTracker::new(source);
    TYPE_DECL
        .captures_iter(source)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if depth.depth_at(whole.start()) != 0 {
                return None;
            }
            caps.name("name").map(|m| m.as_str().to_string())
        })
        .collect()
}
