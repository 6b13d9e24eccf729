/// CSV export of the battery series and toggle feed.
pub mod export;
