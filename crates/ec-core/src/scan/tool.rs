use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::scan::ScanError;

/// Craft tool a user can declare as available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tool {
    Scissors,
    Glue,
    Cutter,
    Paint,
    Thread,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::Scissors,
        Tool::Glue,
        Tool::Cutter,
        Tool::Paint,
        Tool::Thread,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Scissors => "Scissors",
            Tool::Glue => "Glue",
            Tool::Cutter => "Cutter",
            Tool::Paint => "Paint",
            Tool::Thread => "Thread",
        }
    }
}

impl Display for Tool {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown tool: {wanted}"))
    }
}

/// A non-empty set of tools. Instruction requests can only be built from this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolSelection(BTreeSet<Tool>);

impl ToolSelection {
    pub fn new(tools: impl IntoIterator<Item = Tool>) -> Result<Self, ScanError> {
        let set: BTreeSet<Tool> = tools.into_iter().collect();
        if set.is_empty() {
            return Err(ScanError::NoToolsSelected);
        }
        Ok(Self(set))
    }

    pub fn iter(&self) -> impl Iterator<Item = Tool> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, tool: Tool) -> bool {
        self.0.contains(&tool)
    }

    /// Comma separated tool names, in declaration order.
    pub fn joined(&self) -> String {
        self.iter().map(|t| t.name()).collect::<Vec<_>>().join(", ")
    }
}

/// Toggle state behind the "what tools do you have?" screen.
///
/// The generate action stays disabled until at least one tool is picked, so an
/// empty selection never reaches the instruction client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolPicker {
    selected: BTreeSet<Tool>,
}

impl ToolPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, tool: Tool) {
        if !self.selected.remove(&tool) {
            self.selected.insert(tool);
        }
    }

    pub fn is_selected(&self, tool: Tool) -> bool {
        self.selected.contains(&tool)
    }

    pub fn can_generate(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn selection(&self) -> Option<ToolSelection> {
        ToolSelection::new(self.selected.iter().copied()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_is_rejected() {
        assert_eq!(
            ToolSelection::new(Vec::new()).unwrap_err(),
            ScanError::NoToolsSelected
        );
    }

    #[test]
    fn selection_deduplicates_and_joins_in_declaration_order() {
        let tools = ToolSelection::new([Tool::Glue, Tool::Scissors, Tool::Glue]).unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools.joined(), "Scissors, Glue");
    }

    #[test]
    fn picker_enables_generate_only_with_a_tool() {
        let mut picker = ToolPicker::new();
        assert!(!picker.can_generate());
        assert!(picker.selection().is_none());

        picker.toggle(Tool::Paint);
        assert!(picker.can_generate());
        assert!(picker.is_selected(Tool::Paint));

        picker.toggle(Tool::Paint);
        assert!(!picker.can_generate());
    }

    #[test]
    fn tool_names_parse_case_insensitively() {
        assert_eq!("scissors".parse::<Tool>().unwrap(), Tool::Scissors);
        assert_eq!(" THREAD ".parse::<Tool>().unwrap(), Tool::Thread);
        assert!("hammer".parse::<Tool>().is_err());
    }
}
