mod google;

pub use google::GoogleSpeechClient;
