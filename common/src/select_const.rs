/// Upper bound on options rendered in one dropdown.
pub const MAX_OPTIONS: usize = 100;
