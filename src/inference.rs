//! Statement row inference: turns extracted lines into rows of the expected schema.
//!
//! Each line is classified on its own. When the flagged pass is enabled the
//! CR/DR grammar is tried first and the tabular grammar catches whatever it
//! leaves; lines neither grammar accepts are dropped. Output order always
//! follows input order.

use crate::flagged_format::parse_flagged_row;
use crate::schema::{lines_have_type_flags, ColumnRoles, ExpectedSchema};
use crate::tabular_format::parse_tabular_row;
use crate::types::{OutputTable, ParsedRow};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Statement layout selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Detect CR/DR tokens in the statement text.
    #[default]
    Auto,
    /// Always try the CR/DR grammar first.
    Flagged,
    /// Only use the column-aligned grammar.
    Tabular,
}

impl FromStr for Layout {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Layout::Auto),
            "flagged" | "crdr" | "cr-dr" => Ok(Layout::Flagged),
            "tabular" | "positional" => Ok(Layout::Tabular),
            _ => Err(crate::Error::InvalidLayout(s.to_string())),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layout::Auto => "auto",
            Layout::Flagged => "flagged",
            Layout::Tabular => "tabular",
        };
        f.write_str(name)
    }
}

/// Settings handed to the inferencer for one statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InferenceConfig {
    /// Try the CR/DR grammar before the tabular one.
    pub try_flagged: bool,
}

impl InferenceConfig {
    /// Derive the flagged switch from the statement lines.
    pub fn detect<S: AsRef<str>>(lines: &[S]) -> Self {
        Self {
            try_flagged: lines_have_type_flags(lines),
        }
    }

    /// Resolve a layout choice, detecting from the lines for [`Layout::Auto`].
    pub fn for_layout<S: AsRef<str>>(layout: Layout, lines: &[S]) -> Self {
        match layout {
            Layout::Auto => Self::detect(lines),
            Layout::Flagged => Self { try_flagged: true },
            Layout::Tabular => Self { try_flagged: false },
        }
    }
}

/// A single line grammar: returns a row or declines the line.
type RowGrammar = fn(&str, &ExpectedSchema, &ColumnRoles) -> Option<ParsedRow>;

/// Row inferencer bound to one expected schema.
#[derive(Clone)]
pub struct RowInferencer {
    schema: ExpectedSchema,
    roles: ColumnRoles,
    grammars: Vec<(&'static str, RowGrammar)>,
}

impl fmt::Debug for RowInferencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grammars: Vec<&str> = self.grammars.iter().map(|(name, _)| *name).collect();
        f.debug_struct("RowInferencer")
            .field("schema", &self.schema)
            .field("roles", &self.roles)
            .field("grammars", &grammars)
            .finish()
    }
}

impl RowInferencer {
    pub fn new(schema: ExpectedSchema, config: InferenceConfig) -> Self {
        let roles = schema.resolve_roles();
        let mut grammars: Vec<(&'static str, RowGrammar)> = Vec::with_capacity(2);
        if config.try_flagged {
            grammars.push(("flagged", parse_flagged_row));
        }
        grammars.push(("tabular", parse_tabular_row));

        Self {
            schema,
            roles,
            grammars,
        }
    }

    pub fn schema(&self) -> &ExpectedSchema {
        &self.schema
    }

    pub fn roles(&self) -> &ColumnRoles {
        &self.roles
    }

    /// Classify one line.
    pub fn infer_line(&self, line: &str) -> Option<ParsedRow> {
        let line = line.trim();
        self.grammars.iter().find_map(|(name, grammar)| {
            let row = grammar(line, &self.schema, &self.roles)?;
            trace!(grammar = name, line, "line accepted");
            Some(row)
        })
    }

    /// Classify every line, keeping accepted rows in input order.
    pub fn infer<S: AsRef<str>>(&self, lines: &[S]) -> OutputTable {
        let mut table = OutputTable::new(self.schema.columns().to_vec());
        for line in lines {
            let line: &str = line.as_ref();
            match self.infer_line(line) {
                Some(row) => table.push(row),
                None => trace!(line, "line skipped"),
            }
        }

        debug!(
            lines = lines.len(),
            rows = table.len(),
            flagged = self.grammars.len() > 1,
            "statement rows inferred"
        );
        table
    }
}

/// One-shot inference over a schema and its lines.
pub fn infer_rows<S: AsRef<str>>(schema: &ExpectedSchema, lines: &[S], config: InferenceConfig) -> OutputTable {
    RowInferencer::new(schema.clone(), config).infer(lines)
}
