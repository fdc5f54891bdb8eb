use serde::{Deserialize, Serialize};

/// A well-known type seeded into every symbol index.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MarkerType {
    pub simple_name: String,
    pub fqn: String,
    /// Return types starting with this type mark a method as streaming.
    #[serde(default)]
    pub streaming: bool,
}

/// Ordered table of marker types: built-in scalars, containers and the
/// stream type(s) used to detect streaming RPC results.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct MarkerTable {
    entries: Vec<MarkerType>,
}

impl MarkerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plain built-in.
    pub fn with(mut self, simple_name: &str, fqn: &str) -> Self {
        self.push(simple_name, fqn, false);
        self
    }

    /// Adds every `simple` name under `package`.
    pub fn with_package(mut self, package: &str, simple_names: &[&str]) -> Self {
        for simple in simple_names {
            let fqn = crate::qualified_name(package, simple);
            self.push(simple, &fqn, false);
        }
        self
    }

    /// Adds a stream marker.
    pub fn with_stream(mut self, simple_name: &str, fqn: &str) -> Self {
        self.push(simple_name, fqn, true);
        self
    }

    fn push(&mut self, simple_name: &str, fqn: &str, streaming: bool) {
        self.entries.push(MarkerType {
            simple_name: simple_name.to_string(),
            fqn: fqn.to_string(),
            streaming,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkerType> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if `return_type` (already qualified) is a stream of something.
    ///
    /// Accepts the canonical FQN and, for references the qualifier could not
    /// resolve, the bare simple name, both followed by `<`.
    pub fn is_streaming(&self, return_type: &str) -> bool {
        self.entries.iter().filter(|m| m.streaming).any(|m| {
            starts_with_generic(return_type, &m.fqn)
                || starts_with_generic(return_type, &m.simple_name)
        })
    }
}

fn starts_with_generic(ty: &str, base: &str) -> bool {
    ty.strip_prefix(base)
        .map_or(false, |rest| rest.trim_start().starts_with('<'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> MarkerTable {
        MarkerTable::new()
            .with_package("kotlin", &["String", "Int"])
            .with_stream("Flow", "kotlinx.coroutines.flow.Flow")
    }

    #[test]
    fn test_streaming_detection() {
        let t = table();
        assert!(t.is_streaming("kotlinx.coroutines.flow.Flow<com.x.User>"));
        assert!(t.is_streaming("Flow<kotlin.collections.List<User>>"));
        assert!(t.is_streaming("kotlinx.coroutines.flow.Flow<kotlin.Int>?"));
        assert!(!t.is_streaming("kotlin.collections.List<kotlinx.coroutines.flow.Flow<kotlin.Int>>"));
        assert!(!t.is_streaming("FlowState"));
        assert!(!t.is_streaming("com.x.Flow"));
    }

    #[test]
    fn test_table_order() {
        let t = table();
        let names: Vec<_> = t.iter().map(|m| m.simple_name.as_str()).collect();
        assert_eq!(names, vec!["String", "Int", "Flow"]);
        assert_eq!(t.len(), 3);
    }
}
