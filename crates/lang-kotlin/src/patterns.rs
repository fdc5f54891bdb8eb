//! Compiled shapes recognized in Kotlin sources.

use once_cell::sync::Lazy;
use regex::Regex;

pub const RPC_SERVICE: &str = "@RpcService";
pub const RPC_CLIENT: &str = "@RpcClient";
pub const RPC_SERVER: &str = "@RpcServer";

/// Built-in patterns are constants; failing to compile one is a bug.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Failed to compile built-in pattern - this is a fatal error")
}

pub static PACKAGE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?m)^[ \t]*package[ \t]+(?P<pkg>[A-Za-z0-9_.]+)[ \t]*;?[ \t]*\r?$"));

/// `import a.b.C`, `import a.b.*`, `import a.b.C as D`
pub static IMPORT: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?m)^[ \t]*import[ \t]+(?P<path>[A-Za-z0-9_.]+(?:\.\*)?)(?:[ \t]+as[ \t]+(?P<alias>[A-Za-z_][A-Za-z0-9_]*))?[ \t]*;?[ \t]*\r?$",
    )
});

pub static TYPE_DECL: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?mx)
        ^[\x20\t]*
        (?: @[\w.]+ (?:\([^)\n]*\))? [\x20\t]+ )*
        (?: (?:public|internal|private|protected|data|sealed|abstract|open|value|annotation|enum|fun|inline|expect|actual) [\x20\t]+ )*
        (?:class|interface|object) [\x20\t]+
        (?P<name>[A-Za-z_][A-Za-z0-9_]*)
        ",
    )
});

pub static SERVICE_HEADER: Lazy<Regex> = Lazy::new(|| {
    compile(
        r#"(?x)
        @RpcService \s* \( \s* "(?P<route>[^"]+)" \s* \) \s*
        (?: @[\w.]+ (?:\([^)]*\))? \s* )*
        (?: (?:public|internal|private) \s+ )*
        (?: fun \s+ )?
        interface \s+ (?P<name>\w+)
        "#,
    )
});

/// Matches up to and including the `(` opening the parameter list. The list
/// itself may nest calls and function types, so its end is found by scanning.
pub static METHOD: Lazy<Regex> = Lazy::new(|| {
    compile(
        r#"(?x)
        @RpcMethod \s* \( \s* "(?P<id>[^"]+)" \s* \) \s*
        (?: @[\w.]+ (?:\([^)]*\))? \s* )*
        (?: (?:public|abstract|open|override) \s+ )*
        (?: suspend \s+ )?
        fun \s+ (?P<name>\w+) \s*
        \(
        "#,
    )
});

/// Optional `: Type` after a parameter list; the type is line-bounded.
pub static RETURN_TYPE: Lazy<Regex> =
    Lazy::new(|| compile(r"\A[ \t\r\n]*:[ \t\r\n]*(?P<ret>[^\n{=]+)"));

pub static CLIENT_ANCHOR: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?x)
        @RpcClient \s* (?P<args>\([^)]*\))? \s*
        (?: @[\w.]+ (?:\([^)]*\))? \s* )*
        (?: (?:public|internal|private|open|final|sealed) \s+ )*
        abstract \s+ class \s+ (?P<name>\w+)
        (?: \s* <[^>]*> )?
        \s* : \s* (?P<super>[^,{\n]+)
        ",
    )
});

/// The bound interface comes from the `impl` constructor parameter; the
/// supertype is only a hint.
pub static SERVER_ANCHOR: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?x)
        @RpcServer \s* (?P<args>\([^)]*\))? \s*
        (?: @[\w.]+ (?:\([^)]*\))? \s* )*
        (?: (?:public|internal|private|open|final|sealed) \s+ )*
        abstract \s+ class \s+ (?P<name>\w+)
        (?: \s* <[^>]*> )?
        \s* \( \s*
        (?: (?:private|protected|internal|public) \s+ )?
        (?: (?:val|var) \s+ )?
        impl \s* : \s* (?P<impl>[^,)]+) \s* ,? \s*
        \)
        (?: \s* : \s* (?P<super>[\w.]+) )?
        ",
    )
});

/// One `key = value` pair inside an anchor annotation's parentheses.
pub static ANCHOR_ARG: Lazy<Regex> = Lazy::new(|| {
    compile(r#"(?P<key>[A-Za-z_]\w*)\s*=\s*(?:"(?P<text>[^"]*)"|(?P<raw>[^,)\s]+))"#)
});
