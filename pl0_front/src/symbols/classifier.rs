//! Second-pass state machine that classifies identifiers and literals
//!
//! The machine walks the token stream once. Each token maps to an
//! [`ActionColumn`]; `ACTIONS[state][column]` says what to register and
//! `NEXT_STATE[state][column]` where to go. There is no nesting: keywords
//! and punctuation alone drive the walk.

use super::table::{SymbolKind, SymbolTable, UNKNOWN_VALUE};
use crate::config::runtime::SymbolPreferences;
use crate::logging::codes;
use crate::tokens::{SpannedToken, TokenKind, TokenStream};
use crate::utils::Span;
use crate::{log_debug, log_warning};

/// Upper bound on synthesized `TempN` variables
pub const MAX_TEMPORARIES: usize = 3;

/// Token categories used as columns of the action table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionColumn {
    Class,
    Const,
    Var,
    Procedure,
    Identifier,
    Number,
    Assign,
    Comma,
    Semicolon,
    RightBrace,
    EndOfInput,
    Other,
}

impl ActionColumn {
    pub const COUNT: usize = 12;

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Class => ActionColumn::Class,
            TokenKind::Const => ActionColumn::Const,
            TokenKind::Var => ActionColumn::Var,
            TokenKind::Procedure => ActionColumn::Procedure,
            TokenKind::Identifier => ActionColumn::Identifier,
            TokenKind::Number => ActionColumn::Number,
            TokenKind::Assign | TokenKind::AssignEquals => ActionColumn::Assign,
            TokenKind::Comma => ActionColumn::Comma,
            TokenKind::Semicolon => ActionColumn::Semicolon,
            TokenKind::RightBrace => ActionColumn::RightBrace,
            TokenKind::EndOfInput => ActionColumn::EndOfInput,
            TokenKind::Call
            | TokenKind::If
            | TokenKind::Then
            | TokenKind::While
            | TokenKind::Do
            | TokenKind::Odd
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::LeftParen
            | TokenKind::RightParen
            | TokenKind::LeftBrace
            | TokenKind::Dot
            | TokenKind::Equals
            | TokenKind::Less
            | TokenKind::LessEqual
            | TokenKind::NotEqual
            | TokenKind::Greater
            | TokenKind::GreaterEqual => ActionColumn::Other,
        }
    }
}

/// Declaration context of the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClassState {
    Default,
    /// After `class`
    ProgramName,
    /// After `procedure`
    ProcedureName,
    ConstName,
    ConstAfterName,
    ConstValue,
    ConstAfterValue,
    VarName,
    VarAfterName,
}

impl SymbolClassState {
    pub const COUNT: usize = 9;

    pub const fn index(self) -> usize {
        self as usize
    }

    const fn in_declaration(self) -> bool {
        !matches!(
            self,
            SymbolClassState::Default
                | SymbolClassState::ProgramName
                | SymbolClassState::ProcedureName
        )
    }

    pub fn next(self, column: ActionColumn) -> SymbolClassState {
        NEXT_STATE[self.index()][column.index()]
    }

    pub fn action(self, column: ActionColumn) -> Option<SymbolAction> {
        ACTIONS[self.index()][column.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolAction {
    RegisterProgramName,
    RegisterProcedure,
    /// Remember a constant name until its value arrives
    HoldConstant,
    RegisterConstant,
    RegisterVariable,
    RegisterLiteral,
    /// Label a use by what the name was declared as
    ReclassifyUse,
}

type StateTable = [[SymbolClassState; ActionColumn::COUNT]; SymbolClassState::COUNT];
type ActionTable = [[Option<SymbolAction>; ActionColumn::COUNT]; SymbolClassState::COUNT];

const fn build_next_state() -> StateTable {
    use ActionColumn as C;
    use SymbolClassState as S;

    let mut t: StateTable = [[S::Default; ActionColumn::COUNT]; SymbolClassState::COUNT];

    // Declaration states hold until a terminator
    let declaring = [
        S::ConstName,
        S::ConstAfterName,
        S::ConstValue,
        S::ConstAfterValue,
        S::VarName,
        S::VarAfterName,
    ];
    let mut i = 0;
    while i < declaring.len() {
        let row = declaring[i].index();
        let mut col = 0;
        while col < ActionColumn::COUNT {
            t[row][col] = declaring[i];
            col += 1;
        }
        t[row][C::Semicolon.index()] = S::Default;
        t[row][C::RightBrace.index()] = S::Default;
        t[row][C::EndOfInput.index()] = S::Default;
        i += 1;
    }

    t[S::Default.index()][C::Class.index()] = S::ProgramName;
    t[S::Default.index()][C::Const.index()] = S::ConstName;
    t[S::Default.index()][C::Var.index()] = S::VarName;
    t[S::Default.index()][C::Procedure.index()] = S::ProcedureName;

    t[S::ConstName.index()][C::Identifier.index()] = S::ConstAfterName;
    t[S::ConstAfterName.index()][C::Assign.index()] = S::ConstValue;
    t[S::ConstValue.index()][C::Number.index()] = S::ConstAfterValue;
    t[S::ConstAfterValue.index()][C::Comma.index()] = S::ConstName;

    t[S::VarName.index()][C::Identifier.index()] = S::VarAfterName;
    t[S::VarAfterName.index()][C::Comma.index()] = S::VarName;

    t
}

const fn build_actions() -> ActionTable {
    use ActionColumn as C;
    use SymbolAction as A;
    use SymbolClassState as S;

    let mut t: ActionTable = [[None; ActionColumn::COUNT]; SymbolClassState::COUNT];

    t[S::ProgramName.index()][C::Identifier.index()] = Some(A::RegisterProgramName);
    t[S::ProcedureName.index()][C::Identifier.index()] = Some(A::RegisterProcedure);
    t[S::ConstName.index()][C::Identifier.index()] = Some(A::HoldConstant);
    t[S::ConstValue.index()][C::Number.index()] = Some(A::RegisterConstant);
    t[S::VarName.index()][C::Identifier.index()] = Some(A::RegisterVariable);
    t[S::Default.index()][C::Number.index()] = Some(A::RegisterLiteral);
    t[S::Default.index()][C::Identifier.index()] = Some(A::ReclassifyUse);

    t
}

static NEXT_STATE: StateTable = build_next_state();
static ACTIONS: ActionTable = build_actions();

#[derive(Debug, Clone)]
struct PendingConstant {
    name: String,
    span: Span,
}

pub struct SymbolClassificationStateMachine {
    state: SymbolClassState,
    table: SymbolTable,
    pending: Option<PendingConstant>,
    operators_in_statement: usize,
    max_operators: usize,
    preferences: SymbolPreferences,
}

impl SymbolClassificationStateMachine {
    pub fn new() -> Self {
        Self::with_preferences(SymbolPreferences::default())
    }

    pub fn with_preferences(preferences: SymbolPreferences) -> Self {
        Self {
            state: SymbolClassState::Default,
            table: SymbolTable::new(),
            pending: None,
            operators_in_statement: 0,
            max_operators: 0,
            preferences,
        }
    }

    /// Largest number of `+ - * /` seen in any one statement
    pub fn max_operators(&self) -> usize {
        self.max_operators
    }

    pub fn state(&self) -> SymbolClassState {
        self.state
    }

    /// Walk `tokens` once, rewriting identifier and number classifications,
    /// and return the finished table with temporaries appended. The machine
    /// is back in its default state afterwards.
    pub fn classify(&mut self, tokens: &mut TokenStream) -> SymbolTable {
        self.state = SymbolClassState::Default;
        self.operators_in_statement = 0;
        self.max_operators = 0;
        self.pending = None;

        for token in tokens.iter_mut() {
            self.step(token);
        }
        self.finish()
    }

    fn step(&mut self, token: &mut SpannedToken) {
        let kind = token.value.kind;

        if kind.is_arithmetic_operator() {
            self.operators_in_statement += 1;
        }
        if kind.is_statement_terminator() {
            self.max_operators = self.max_operators.max(self.operators_in_statement);
            self.operators_in_statement = 0;
        }

        let column = ActionColumn::of(kind);
        if let Some(action) = self.state.action(column) {
            self.apply(action, token);
        }

        let next = self.state.next(column);
        if next == SymbolClassState::Default && self.state.in_declaration() {
            self.drop_pending();
        }
        self.state = next;
    }

    fn apply(&mut self, action: SymbolAction, token: &mut SpannedToken) {
        let lexeme = token.value.lexeme.clone();

        match action {
            SymbolAction::RegisterProgramName => {
                token.value.reclassify(SymbolKind::ProgramName);
                self.register(&lexeme, SymbolKind::ProgramName, UNKNOWN_VALUE);
            }
            SymbolAction::RegisterProcedure => {
                token.value.reclassify(SymbolKind::Procedure);
                self.register(&lexeme, SymbolKind::Procedure, UNKNOWN_VALUE);
            }
            SymbolAction::HoldConstant => {
                token.value.reclassify(SymbolKind::Constant);
                self.pending = Some(PendingConstant {
                    name: lexeme,
                    span: token.span,
                });
            }
            SymbolAction::RegisterConstant => {
                if let Some(pending) = self.pending.take() {
                    token.value.reclassify(SymbolKind::NumericLiteral);
                    self.register(&pending.name, SymbolKind::Constant, &lexeme);
                }
            }
            SymbolAction::RegisterVariable => {
                token.value.reclassify(SymbolKind::Variable);
                self.register(&lexeme, SymbolKind::Variable, UNKNOWN_VALUE);
            }
            SymbolAction::RegisterLiteral => {
                token.value.reclassify(SymbolKind::NumericLiteral);
                if !self.table.contains_literal(&lexeme) {
                    self.register(&lexeme, SymbolKind::NumericLiteral, &lexeme);
                }
            }
            SymbolAction::ReclassifyUse => {
                let kind = match self.table.lookup(&lexeme).map(|e| e.kind) {
                    Some(SymbolKind::Procedure) => SymbolKind::Procedure,
                    Some(SymbolKind::ProgramName) => SymbolKind::ProgramName,
                    _ => SymbolKind::Variable,
                };
                token.value.reclassify(kind);
            }
        }
    }

    fn register(&mut self, name: &str, kind: SymbolKind, value: &str) {
        let added = self.table.add(name, kind, value).map(|e| e.address);

        if self.preferences.log_registrations {
            match added {
                Some(address) => log_debug!("Symbol registered",
                    "name" => name,
                    "kind" => kind,
                    "segment" => kind.segment(),
                    "address" => address
                ),
                None => log_debug!("Symbol already registered", "name" => name),
            }
        }
    }

    /// A constant name whose value never arrived
    fn drop_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            log_warning!(
                code = codes::symbols::DANGLING_CONSTANT,
                "Constant declared without a value",
                span = pending.span,
                "name" => pending.name
            );
        }
    }

    fn finish(&mut self) -> SymbolTable {
        // A stream without EOF still closes its last statement
        self.max_operators = self.max_operators.max(self.operators_in_statement);
        self.drop_pending();

        let temporaries = self.max_operators.min(MAX_TEMPORARIES);
        for n in 1..=temporaries {
            self.register(&format!("Temp{}", n), SymbolKind::Variable, UNKNOWN_VALUE);
        }

        self.state = SymbolClassState::Default;
        std::mem::take(&mut self.table)
    }
}

impl Default for SymbolClassificationStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify `tokens` with default preferences
pub fn classify(tokens: &mut TokenStream) -> SymbolTable {
    SymbolClassificationStateMachine::new().classify(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize;
    use crate::symbols::Segment;

    fn table_for(text: &str) -> (SymbolTable, TokenStream) {
        let (mut stream, _) = tokenize(text);
        let table = SymbolClassificationStateMachine::with_preferences(SymbolPreferences {
            log_registrations: false,
        })
        .classify(&mut stream);
        (table, stream)
    }

    fn rows(table: &SymbolTable) -> Vec<(String, SymbolKind, String, u32, Segment)> {
        table
            .iter()
            .map(|e| (e.name.clone(), e.kind, e.value.clone(), e.address, e.segment))
            .collect()
    }

    fn row(
        name: &str,
        kind: SymbolKind,
        value: &str,
        address: u32,
        segment: Segment,
    ) -> (String, SymbolKind, String, u32, Segment) {
        (name.to_string(), kind, value.to_string(), address, segment)
    }

    #[test]
    fn test_sample_program_table() {
        let (table, stream) =
            table_for("class X; var a, b; const c = 5; begin a := b + c end.");

        assert_eq!(
            rows(&table),
            vec![
                row("X", SymbolKind::ProgramName, "?", 0, Segment::Code),
                row("a", SymbolKind::Variable, "?", 0, Segment::Data),
                row("b", SymbolKind::Variable, "?", 2, Segment::Data),
                row("c", SymbolKind::Constant, "5", 4, Segment::Data),
                row("Temp1", SymbolKind::Variable, "?", 6, Segment::Data),
            ]
        );

        let labels: Vec<(&str, &str)> = stream
            .iter()
            .map(|t| (t.value.lexeme.as_str(), t.value.label()))
            .collect();
        assert_eq!(labels[1], ("X", "$program name"));
        assert_eq!(labels[9], ("c", "Constvar"));
        assert_eq!(labels[11], ("5", "Numeric literal"));
        assert_eq!(labels[13], ("begin", "Var"));
    }

    #[test]
    fn test_repeated_var_registers_once() {
        let (table, _) = table_for("var x, x;");
        assert_eq!(rows(&table), vec![row("x", SymbolKind::Variable, "?", 0, Segment::Data)]);
    }

    #[test]
    fn test_addresses_step_by_two_per_segment() {
        let (table, _) =
            table_for("class P; procedure Q; procedure R; var a, b, c; const k = 1, m = 2;");

        for segment in [Segment::Code, Segment::Data] {
            let addresses: Vec<u32> = table.in_segment(segment).map(|e| e.address).collect();
            let expected: Vec<u32> = (0..addresses.len() as u32).map(|i| i * 2).collect();
            assert_eq!(addresses, expected, "{:?}", segment);
        }
        assert_eq!(table.in_segment(Segment::Code).count(), 3);
        assert_eq!(table.in_segment(Segment::Data).count(), 5);
    }

    #[test]
    fn test_temporaries_capped_at_three() {
        let (table, _) = table_for("var a; a := a + a * a - a / a;");
        assert_eq!(table.count_of(SymbolKind::Variable), 1 + MAX_TEMPORARIES);
        assert!(table.contains("Temp3"));
        assert!(!table.contains("Temp4"));
    }

    #[test]
    fn test_temporaries_follow_worst_statement() {
        let (mut stream, _) = tokenize("a := a + 1; if a > 1 then b := a * 2 - 1; c := 3");
        let mut machine = SymbolClassificationStateMachine::new();
        let table = machine.classify(&mut stream);
        assert_eq!(machine.max_operators(), 2);
        assert!(table.contains("Temp2"));
        assert!(!table.contains("Temp3"));
    }

    #[test]
    fn test_no_operators_no_temporaries() {
        let (table, _) = table_for("var a; a := 1.");
        assert!(!table.iter().any(|e| e.name.starts_with("Temp")));
    }

    #[test]
    fn test_existing_temp_name_is_not_duplicated() {
        let (table, _) = table_for("var Temp1; Temp1 := Temp1 + 1;");
        assert_eq!(table.iter().filter(|e| e.name == "Temp1").count(), 1);
        assert_eq!(table.lookup("Temp1").map(|e| e.address), Some(0));
    }

    #[test]
    fn test_numeric_literals_registered_once() {
        let (table, stream) = table_for("a := 7; b := 7; c := 8");
        assert_eq!(table.count_of(SymbolKind::NumericLiteral), 2);
        let seven = table.lookup("7").unwrap();
        assert_eq!((seven.value.as_str(), seven.address), ("7", 0));
        assert!(stream
            .iter()
            .filter(|t| t.value.kind == TokenKind::Number)
            .all(|t| t.value.label() == "Numeric literal"));
    }

    #[test]
    fn test_constant_value_is_not_a_literal_row() {
        let (table, _) = table_for("const c = 5; x := 5");
        assert_eq!(table.lookup("c").map(|e| e.value.as_str()), Some("5"));
        assert_eq!(table.count_of(SymbolKind::NumericLiteral), 1);
        assert_eq!(table.lookup("5").map(|e| e.address), Some(2));
    }

    #[test]
    fn test_dangling_constant_is_dropped() {
        let (table, _) = table_for("const c; var d;");
        assert!(!table.contains("c"));
        assert!(table.contains("d"));
    }

    #[test]
    fn test_use_reclassification() {
        let (_, stream) = table_for("class M { procedure P; call P; call M; x := y }");
        let labels: Vec<(&str, &str)> = stream
            .iter()
            .filter(|t| t.value.kind == TokenKind::Identifier)
            .map(|t| (t.value.lexeme.as_str(), t.value.label()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("M", "$program name"),
                ("P", "Procedure"),
                ("P", "Procedure"),
                ("M", "$program name"),
                ("x", "Var"),
                ("y", "Var"),
            ]
        );
    }

    #[test]
    fn test_brace_closes_declaration() {
        let (table, _) = table_for("class M { var a } b := 3");
        assert!(table.contains("a"));
        assert!(!table.contains("b"));
        assert!(table.contains("3"));
    }

    #[test]
    fn test_state_tables() {
        use ActionColumn as C;
        use SymbolClassState as S;

        assert_eq!(S::Default.next(C::Class), S::ProgramName);
        assert_eq!(S::ProgramName.next(C::Identifier), S::Default);
        assert_eq!(S::ConstAfterValue.next(C::Comma), S::ConstName);
        assert_eq!(S::VarAfterName.next(C::Other), S::VarAfterName);
        assert_eq!(S::ConstValue.next(C::EndOfInput), S::Default);
        assert_eq!(S::Default.action(C::Number), Some(SymbolAction::RegisterLiteral));
        assert_eq!(S::VarAfterName.action(C::Identifier), None);
        assert_eq!(C::of(TokenKind::AssignEquals), C::Assign);
    }
}
