pub mod design;
pub mod filtfilt;
pub mod invoke;
pub mod lfilter;
