pub(crate) mod interview;
pub(crate) mod report;
pub(crate) mod serve;
pub(crate) mod study;
