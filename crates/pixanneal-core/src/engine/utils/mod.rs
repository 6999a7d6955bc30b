pub(crate) mod lanes;
