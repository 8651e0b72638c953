use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of the random suffix appended to a taken base candidate.
pub const SUFFIX_LENGTH: usize = 5;

/// Base username candidate: everything before the first `@`.
pub fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Append a fresh random alphanumeric suffix to the base candidate.
///
/// URL-safe alphabet (`[A-Za-z0-9]`). Called once per allocation attempt;
/// uniqueness is still the repository constraint's job.
pub fn with_random_suffix(base: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LENGTH)
        .map(char::from)
        .collect();

    format!("{base}{suffix}")
}
