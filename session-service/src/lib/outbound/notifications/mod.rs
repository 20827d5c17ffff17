pub mod smtp;

pub use smtp::SmtpLoginNotifier;
