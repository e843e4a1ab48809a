pub mod past_events;

pub use past_events::{
    average_rating, past_events_for_club, summarize_event, ConvenorView, PastEventSummary,
    PastEventsResponse, WinnerView, PAST_EVENTS_MESSAGE,
};
