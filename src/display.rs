use std::fmt::{Display, Formatter};

use owo_colors::OwoColorize;
use tabled::{builder::Builder, settings::Style};

use crate::Dfa;

/// Prints the transition table. The start state is underlined, accepting states are marked with
/// `*` and undefined transitions are shown as `⊥`.
impl Display for Dfa {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut builder = Builder::default();
        let alphabet: Vec<&str> = self.alphabet().symbols().collect();

        builder.push_record(
            std::iter::once("δ".bright_yellow().to_string())
                .chain(alphabet.iter().map(|s| s.purple().to_string())),
        );
        for state in self.states() {
            let name = if self.is_accepting(state) {
                format!("*{state}")
            } else {
                state.clone()
            };
            let label = if state == self.start_state() {
                name.underline().to_string()
            } else {
                name
            };
            let mut row = vec![label];
            for sym in &alphabet {
                match self.successor(state, sym) {
                    Some(target) => row.push(target.to_string()),
                    None => row.push("⊥".dimmed().to_string()),
                }
            }
            builder.push_record(row);
        }
        let mut transition_table = builder.build();
        transition_table.with(Style::modern());
        write!(f, "{}", transition_table)
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::stuck_in_q1;

    #[test]
    fn table_lists_every_state() {
        let table = stuck_in_q1().to_string();
        assert!(table.contains("q0"));
        assert!(table.contains("*q1"));
        assert!(table.contains('⊥'));
        assert_eq!(table.lines().filter(|l| l.contains("q1")).count(), 2);
    }
}
