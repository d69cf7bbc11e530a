const MOVIES_RETRIEVED_METRIC_NAME: &str = "movies_retrieved";
const MOVIES_CREATED_METRIC_NAME: &str = "num_movies_created";

#[inline]
pub fn increment_movies_retrieved() {
    increment_movies_retrieved_by(1);
}

#[inline]
pub fn increment_movies_retrieved_by(amt: usize) {
    match u64::try_from(amt) {
        Ok(amt) => metrics::counter!(MOVIES_RETRIEVED_METRIC_NAME).increment(amt),
        Err(e) => tracing::error!("could not increment movies retrieved metric: {e}"),
    }
}

#[inline]
pub fn increment_movies_created() {
    metrics::counter!(MOVIES_CREATED_METRIC_NAME).increment(1);
}
