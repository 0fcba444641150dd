pub mod record_date;
