pub(crate) mod bearer_token;
