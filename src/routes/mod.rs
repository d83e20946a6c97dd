pub(crate) mod abtests;
pub(crate) mod analytics;
pub(crate) mod health;
