// file: src/models/participant.rs

/// The closed list of people who can take part.
pub const PARTICIPANTS: [&str; 6] = [
    "Wolfi",
    "Peter",
    "Robert",
    "Tobias",
    "Andreas",
    "Special guest",
];

/// Returns the canonical participant entry for `name`, if it is on the list.
pub fn find_participant(name: &str) -> Option<&'static str> {
    PARTICIPANTS.iter().copied().find(|p| *p == name)
}

pub fn is_participant(name: &str) -> bool {
    find_participant(name).is_some()
}
