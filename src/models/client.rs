/// Fixed list of client names the form lets the user pick from.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRoster {
    names: Vec<String>,
}

impl ClientRoster {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// The name after `current`, or the first one when nothing is selected.
    /// Past the last name the selection goes back to empty.
    pub fn next_after(&self, current: &str) -> &str {
        match self.position(current) {
            Some(i) if i + 1 < self.names.len() => &self.names[i + 1],
            Some(_) => "",
            None => self.names.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// Mirror of [`ClientRoster::next_after`].
    pub fn previous_before(&self, current: &str) -> &str {
        match self.position(current) {
            Some(0) => "",
            Some(i) => &self.names[i - 1],
            None => self.names.last().map(String::as_str).unwrap_or(""),
        }
    }
}

impl Default for ClientRoster {
    fn default() -> Self {
        Self::new(vec![
            "Client A".to_string(),
            "Client B".to_string(),
            "Client C".to_string(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_through_names_and_empty_choice() {
        let roster = ClientRoster::default();
        assert_eq!(roster.next_after(""), "Client A");
        assert_eq!(roster.next_after("Client A"), "Client B");
        assert_eq!(roster.next_after("Client C"), "");
        assert_eq!(roster.previous_before(""), "Client C");
        assert_eq!(roster.previous_before("Client A"), "");
    }

    #[test]
    fn test_unknown_name_starts_from_the_ends() {
        let roster = ClientRoster::default();
        assert!(!roster.contains("Client Z"));
        assert_eq!(roster.next_after("Client Z"), "Client A");
        assert_eq!(roster.previous_before("Client Z"), "Client C");
    }
}
