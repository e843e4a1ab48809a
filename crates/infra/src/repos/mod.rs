pub mod events;

pub use events::{assemble_records, EventAssociations, EventRepo, PastEventStore};
