/// Sample data seeding
///
/// At startup the API fills an empty store with synthetic contacts so the
/// service has something to show. Seeding is guarded by `count()`: when any
/// record exists it does nothing, which makes restarts safe.
///
/// Records are built from fixed name, street, city and state lists:
///
/// ```text
/// name       "Alice Anderson"
/// address    "4821 Oak Ave, Springfield, CA 90210"
/// email      "alice.anderson@gmail.com" | "aliceanderson17@yahoo.com" | "aanderson@outlook.com"
/// telephone  "(415) 555-0134"
/// ```
///
/// # Example
///
/// ```
/// use contactbook_shared::seed::{seed_sample_users, SeedConfig, SeedOutcome};
/// use contactbook_shared::store::{memory::InMemoryUserStore, UserStore};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), contactbook_shared::store::StoreError> {
/// let store = InMemoryUserStore::new();
/// let config = SeedConfig { enabled: true, user_count: 10 };
///
/// let outcome = seed_sample_users(&store, &config).await?;
/// assert_eq!(outcome, SeedOutcome::Seeded { inserted: 10 });
///
/// // Second run sees existing records and skips
/// let outcome = seed_sample_users(&store, &config).await?;
/// assert_eq!(outcome, SeedOutcome::Skipped { existing: 10 });
/// # Ok(())
/// # }
/// ```

use std::collections::HashSet;

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::models::user::UserPayload;
use crate::store::{StoreError, StoreResult, UserStore};

/// Number of records generated when not configured otherwise
pub const DEFAULT_SEED_USER_COUNT: usize = 100;

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bob", "Carol", "David", "Emma", "Frank", "Grace", "Henry", "Ivy", "Jack", "Kate",
    "Liam", "Mia", "Noah", "Olivia", "Paul", "Quinn", "Ruby", "Sam", "Tina", "Uma", "Victor",
    "Wendy", "Xavier", "Yara", "Zoe", "Aaron", "Beth", "Chris", "Diana", "Eric", "Fiona",
    "George", "Hannah", "Ian", "Julia", "Kevin", "Luna", "Mark", "Nina", "Oscar", "Penny",
    "Quincy", "Rose", "Steve", "Tara", "Ulrich", "Vera", "Will", "Xara", "Yale", "Zara",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Brown", "Clark", "Davis", "Evans", "Fisher", "Garcia", "Harris", "Johnson",
    "King", "Lee", "Martinez", "Nelson", "O'Connor", "Parker", "Quinn", "Robinson", "Smith",
    "Taylor", "Underwood", "Vance", "Wilson", "Young", "Zhang", "Adams", "Baker", "Cooper",
    "Duncan", "Edwards", "Foster", "Green", "Hall", "Irving", "Jones", "Kelly", "Lopez", "Moore",
    "Nash", "Owen", "Phillips", "Reed", "Sullivan", "Thompson", "Vaughn", "White", "Cross",
    "Bell", "Stone",
];

const STREETS: &[&str] = &[
    "Main St", "Oak Ave", "Pine Rd", "Cedar Ln", "Elm Dr", "Maple Way", "First St", "Second Ave",
    "Park Blvd", "River Rd", "Hill St", "Valley Dr", "Sunset Ave", "Spring St", "Garden Ln",
    "Forest Dr", "Lake Ave", "Beach Rd",
];

const CITIES: &[&str] = &[
    "Springfield", "Riverside", "Franklin", "Georgetown", "Arlington", "Fairview", "Clinton",
    "Madison", "Washington", "Jackson", "Lincoln", "Jefferson", "Hamilton", "Monroe", "Adams",
    "Wilson", "Taylor", "Brown",
];

const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY",
];

const EMAIL_DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "outlook.com", "example.com"];

/// Seeder settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    /// Whether to seed at all
    pub enabled: bool,

    /// Records generated into an empty store
    pub user_count: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            user_count: DEFAULT_SEED_USER_COUNT,
        }
    }
}

/// What a seeding run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Seeding is turned off
    Disabled,

    /// The store already had records
    Skipped { existing: i64 },

    /// Records were generated and stored
    Seeded { inserted: usize },
}

/// Produces synthetic contact records
///
/// Emails are unique across everything one generator produces: a randomly
/// chosen format that collides with an earlier email is replaced by a format
/// carrying the record index.
pub struct SampleUserGenerator<R: Rng> {
    rng: R,
    used_emails: HashSet<String>,
}

impl SampleUserGenerator<StdRng> {
    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> SampleUserGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            used_emails: HashSet::new(),
        }
    }

    /// Generates records numbered `1..=count`
    pub fn generate_batch(&mut self, count: usize) -> Vec<UserPayload> {
        (1..=count).map(|index| self.generate(index)).collect()
    }

    /// Generates one record; `index` must differ between calls
    pub fn generate(&mut self, index: usize) -> UserPayload {
        let first = pick(&mut self.rng, FIRST_NAMES);
        let last = pick(&mut self.rng, LAST_NAMES);

        UserPayload {
            name: format!("{} {}", first, last),
            address: self.address(),
            email: self.email(first, last, index),
            telephone: self.telephone(),
        }
    }

    fn address(&mut self) -> String {
        let number = self.rng.gen_range(100..10_000);
        let street = pick(&mut self.rng, STREETS);
        let city = pick(&mut self.rng, CITIES);
        let state = pick(&mut self.rng, STATES);
        let zip = self.rng.gen_range(10_000..100_000);

        format!("{} {}, {}, {} {:05}", number, street, city, state, zip)
    }

    fn email(&mut self, first: &str, last: &str, index: usize) -> String {
        let first = local_part(first);
        let last = local_part(last);
        let domain = pick(&mut self.rng, EMAIL_DOMAINS);

        let candidate = match self.rng.gen_range(0..3) {
            0 => format!("{}.{}@{}", first, last, domain),
            1 => format!("{}{}{}@{}", first, last, index, domain),
            _ => format!("{}{}@{}", &first[..1], last, domain),
        };

        let email = if self.used_emails.contains(&candidate) {
            // Dotted and indexed: cannot match any other format or index
            format!("{}.{}.{}@{}", first, last, index, domain)
        } else {
            candidate
        };

        self.used_emails.insert(email.clone());
        email
    }

    fn telephone(&mut self) -> String {
        let area = self.rng.gen_range(200..900);
        let exchange = self.rng.gen_range(200..900);
        let number = self.rng.gen_range(0..10_000);

        format!("({:03}) {:03}-{:04}", area, exchange, number)
    }
}

fn pick<R: Rng>(rng: &mut R, items: &'static [&'static str]) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Lowercases a name and drops characters that do not belong in a local part
fn local_part(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Fills an empty store with generated records
///
/// Does nothing when disabled or when the store already holds records. A
/// generated email that a concurrent request stored first is logged and
/// skipped rather than failing the run.
///
/// # Errors
///
/// Returns any store error other than a duplicate email.
pub async fn seed_sample_users(
    store: &dyn UserStore,
    config: &SeedConfig,
) -> StoreResult<SeedOutcome> {
    if !config.enabled {
        info!("Sample data seeding disabled");
        return Ok(SeedOutcome::Disabled);
    }

    let existing = store.count().await?;
    if existing > 0 {
        info!(existing, "Users already exist, skipping sample data seeding");
        return Ok(SeedOutcome::Skipped { existing });
    }

    info!(count = config.user_count, "Generating sample users");
    let batch = SampleUserGenerator::from_entropy().generate_batch(config.user_count);

    let mut inserted = 0;
    for payload in batch {
        match store.insert(payload).await {
            Ok(user) => {
                debug!(user_id = user.id, email = %user.email, "Seeded user");
                inserted += 1;
            }
            Err(StoreError::DuplicateEmail(email)) => {
                warn!(email = %email, "Sample email already taken, skipping");
            }
            Err(e) => return Err(e),
        }
    }

    info!(inserted, "Sample data seeding complete");
    Ok(SeedOutcome::Seeded { inserted })
}
