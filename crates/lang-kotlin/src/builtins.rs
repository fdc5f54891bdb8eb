use kwire_api::MarkerTable;

pub const FLOW_FQN: &str = "kotlinx.coroutines.flow.Flow";

/// Kotlin built-ins known to every symbol index.
pub fn kotlin_markers() -> MarkerTable {
    MarkerTable::new()
        .with_package(
            "kotlin",
            &[
                "Int", "Long", "Short", "Byte", "Float", "Double", "Boolean", "Char", "Unit",
                "String", "Any",
            ],
        )
        .with_package(
            "kotlin.collections",
            &[
                "List",
                "Set",
                "Map",
                "MutableList",
                "MutableSet",
                "MutableMap",
                "Collection",
                "Iterable",
            ],
        )
        .with_stream("Flow", FLOW_FQN)
}
