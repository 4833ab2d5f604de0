//! Domain events - Facts published after a command has been applied

mod domain_events;

pub use domain_events::Event;
