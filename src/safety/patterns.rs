//! Built-in pattern groups for the input screen.
//!
//! Patterns are matched against lower-cased text, so they are written in
//! lower case and carry no `(?i)` flag. Spanish and English phrasings are
//! both covered since the support desk receives both.

use super::PatternGroup;

pub const OVERRIDE: &str = "override";
pub const EXFILTRATION: &str = "exfiltration";
pub const EXECUTION: &str = "execution";
pub const ENCODED: &str = "encoded";
pub const OUT_OF_SCOPE: &str = "out_of_scope";

/// All built-in groups, in evaluation order.
pub fn default_groups() -> Vec<PatternGroup> {
    vec![
        override_group(),
        exfiltration_group(),
        execution_group(),
        encoded_group(),
        out_of_scope_group(),
    ]
}

fn group(name: &str, patterns: &[&str]) -> PatternGroup {
    PatternGroup::new(name, patterns).expect("built-in safety patterns are valid regexes")
}

// ---- Instruction override ----

fn override_group() -> PatternGroup {
    group(OVERRIDE, &[
        r"ignora (las )?instrucciones",
        r"olvida (las )?instrucciones",
        r"actúa como",
        r"ignore (all |any |the )?(previous |prior |above )?(instructions|rules)",
        r"forget (all |the )?(previous |prior )?instructions",
        r"disregard (all |the )?(previous |prior )?(instructions|rules)",
        r"\bact as\b",
        r"you are now",
        r"system prompt",
        r"override",
        r"reveal your instructions",
        r"muestra tus reglas",
        r"internal rules",
    ])
}

// ---- Credential / data exfiltration ----

fn exfiltration_group() -> PatternGroup {
    group(EXFILTRATION, &[
        r"api[_\- ]?key",
        r"token",
        r"password",
        r"credentials?",
        r"connection string",
        r"database dump",
        r"export all data",
        r"full dataset",
        r"private data",
        r"datos internos",
    ])
}

// ---- Command, SQL and network execution ----

fn execution_group() -> PatternGroup {
    group(EXECUTION, &[
        r"execute sql",
        r"run this query",
        r"delete from",
        r"drop table",
        r"shell command",
        r"bash",
        r"curl http",
        r"wget",
        r"send email",
        r"call api",
        r"modify user role",
        r"access database",
    ])
}

// ---- Encoded payload markers ----

fn encoded_group() -> PatternGroup {
    group(ENCODED, &[r"base64", r"atob\(", r"<script>", r"<!--", r"```"])
}

// ---- Requests outside the support scope ----

fn out_of_scope_group() -> PatternGroup {
    group(OUT_OF_SCOPE, &[
        r"write a poem",
        r"generate code",
        r"create malware",
        r"hack",
        r"exploit",
        r"penetration test",
    ])
}
