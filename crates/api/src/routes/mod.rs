pub mod past_events;
