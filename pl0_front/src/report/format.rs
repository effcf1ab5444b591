//! Plain-text renderings of the token list and the symbol table

use crate::symbols::SymbolTable;
use crate::tokens::TokenStream;
use std::fmt::Write;

const TOKEN_RULE_WIDTH: usize = 52;
const SYMBOL_RULE_WIDTH: usize = 75;

/// Two columns: lexeme and classification label, EOF row included
pub fn render_token_report(tokens: &TokenStream) -> String {
    let mut out = format!("{:<24} {}\n", "Token", "Classification");
    out.push_str(&"-".repeat(TOKEN_RULE_WIDTH));
    out.push('\n');

    for token in tokens {
        // Writing into a String cannot fail
        let _ = writeln!(out, "{:<24} {}", token.value.lexeme, token.value.label());
    }

    out
}

/// Five columns: name, classification, value, address, segment
pub fn render_symbol_report(table: &SymbolTable) -> String {
    let rule = "-".repeat(SYMBOL_RULE_WIDTH);
    let mut out = String::from("Symbol Table:\n");
    let _ = writeln!(
        out,
        "{:<24} {:<18} {:<10} {:<8} {:<7}",
        "Symbol", "Classification", "Value", "Address", "Segment"
    );
    out.push_str(&rule);
    out.push('\n');

    for entry in table {
        let _ = writeln!(
            out,
            "{:<24} {:<18} {:<10} {:<8} {:<7}",
            entry.name,
            entry.kind.label(),
            entry.value,
            entry.address,
            entry.segment.label()
        );
    }

    out.push_str(&rule);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize;
    use crate::symbols::{SymbolKind, UNKNOWN_VALUE};

    #[test]
    fn test_token_report_layout() {
        let (stream, _) = tokenize("x := 10");
        let report = render_token_report(&stream);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], format!("{:<24} {}", "Token", "Classification"));
        assert_eq!(lines[1], "-".repeat(52));
        assert_eq!(lines[2], format!("{:<24} {}", "x", "var"));
        assert_eq!(lines[3], format!("{:<24} {}", ":=", "$="));
        assert_eq!(lines[4], format!("{:<24} {}", "10", "Numeric literal"));
        assert_eq!(lines[5], format!("{:<24} {}", "EOF", "$eof"));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_symbol_report_layout() {
        let mut table = SymbolTable::new();
        table.add("X", SymbolKind::ProgramName, UNKNOWN_VALUE);
        table.add("c", SymbolKind::Constant, "5");

        let report = render_symbol_report(&table);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Symbol Table:");
        assert!(lines[1].starts_with("Symbol                   Classification"));
        assert_eq!(lines[2], "-".repeat(75));
        assert_eq!(
            lines[3],
            format!("{:<24} {:<18} {:<10} {:<8} {:<7}", "X", "$program name", "?", 0, "CS")
        );
        assert_eq!(
            lines[4],
            format!("{:<24} {:<18} {:<10} {:<8} {:<7}", "c", "Constvar", "5", 0, "DS")
        );
        assert_eq!(lines[5], "-".repeat(75));
    }

    #[test]
    fn test_empty_table_still_has_frame() {
        let report = render_symbol_report(&SymbolTable::new());
        assert_eq!(report.lines().count(), 4);
    }
}
