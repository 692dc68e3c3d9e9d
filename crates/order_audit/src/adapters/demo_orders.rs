// Rust guideline compliant 2026-10-16

//! Seeded demo-order generator, also usable as an in-memory `OrderSource`.
//!
//! Produces a storefront-like mix: most orders are genuine, the rest carry
//! one fabrication each (demo numbers, placeholder notes, seed accounts,
//! zero totals, deactivated users, empty carts, demo SKUs, deleted
//! products). Identical seeds produce identical orders, ids included.

use domain::{OrderItem, OrderRecord, OrderSource, ProductRef, SourceError, UserRef};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Share of generated orders that are genuine, in percent.
const GENUINE_PERCENT: u32 = 80;

const FIRST_NAMES: &[&str] = &["alice", "bruno", "chloe", "dmitri", "emma", "farid", "giulia"];
const DOMAINS: &[&str] = &["gmail.com", "outlook.com", "proton.me", "yahoo.fr"];
/// Catalog entries: `(product id, sku)`. One product has no SKU.
const CATALOG: &[(&str, Option<&str>)] = &[
    ("prod-tee", Some("TEE-BLK-M")),
    ("prod-hoodie", Some("HOODIE-GRY-L")),
    ("prod-cap", Some("CAP-NVY")),
    ("prod-polo", Some("POLO-WHT-S")),
    ("prod-custom", None),
];

/// The fabrication applied to a non-genuine order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fabrication {
    DemoNumber,
    SampleNumber,
    ReservedCode,
    PlaceholderNotes,
    SeedAccount,
    ZeroTotal,
    InactiveUser,
    EmptyCart,
    DemoSku,
    DeletedProduct,
}

impl Fabrication {
    const ALL: [Self; 10] = [
        Self::DemoNumber,
        Self::SampleNumber,
        Self::ReservedCode,
        Self::PlaceholderNotes,
        Self::SeedAccount,
        Self::ZeroTotal,
        Self::InactiveUser,
        Self::EmptyCart,
        Self::DemoSku,
        Self::DeletedProduct,
    ];

    fn apply(self, order: &mut OrderRecord, rng: &mut StdRng) {
        match self {
            Self::DemoNumber => order.order_number = format!("DEMO-{}", rng.random_range(1..10_000)),
            Self::SampleNumber => {
                order.order_number = format!("SAMPLE-{}", rng.random_range(1..10_000));
            }
            Self::ReservedCode => order.order_number = "ORD-000000".to_owned(),
            Self::PlaceholderNotes => order.notes = Some("Placeholder - do not ship".to_owned()),
            Self::SeedAccount => {
                order.user = Some(UserRef { email: Some("demo@example.com".to_owned()), is_active: true });
            }
            Self::ZeroTotal => order.total = 0.0_f64,
            Self::InactiveUser => {
                if let Some(user) = order.user.as_mut() {
                    user.is_active = false;
                }
            }
            Self::EmptyCart => order.order_items = Some(vec![]),
            Self::DemoSku => order.order_items.get_or_insert_with(Vec::new).push(OrderItem {
                product: Some(ProductRef { id: "prod-demo".to_owned(), sku: Some("DEMO-TEE".to_owned()) }),
            }),
            Self::DeletedProduct => {
                order.order_items.get_or_insert_with(Vec::new).push(OrderItem { product: None });
            }
        }
    }
}

/// In-memory `OrderSource` over a generated batch of orders.
#[derive(Debug)]
pub struct DemoOrders {
    orders: Vec<OrderRecord>,
}

impl DemoOrders {
    /// Generate `count` orders.
    ///
    /// `seed = Some(s)` produces deterministic results; `None` seeds from the OS.
    #[must_use]
    pub fn generate(count: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        let orders = (0..count).map(|_| generate_order(&mut rng)).collect();
        Self { orders }
    }

    /// The generated orders, in generation order.
    #[must_use]
    pub fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }
}

impl OrderSource for DemoOrders {
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Vec<OrderRecord>, SourceError> {
        Ok(self.orders.iter().skip(offset).take(limit).cloned().collect())
    }
}

fn generate_order(rng: &mut StdRng) -> OrderRecord {
    let id = uuid::Builder::from_random_bytes(rng.random()).into_uuid();
    let first_name = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
    let domain = DOMAINS[rng.random_range(0..DOMAINS.len())];
    let item_count = rng.random_range(1..=4);
    let order_items = (0..item_count)
        .map(|_| {
            let (product_id, sku) = CATALOG[rng.random_range(0..CATALOG.len())];
            OrderItem {
                product: Some(ProductRef { id: product_id.to_owned(), sku: sku.map(str::to_owned) }),
            }
        })
        .collect();

    let mut order = OrderRecord {
        id: id.to_string(),
        // Stays clear of the reserved ORD-000000 / 111111 / 999999 codes.
        order_number: format!("ORD-{}", rng.random_range(200_000..999_000)),
        total: f64::from(rng.random_range(500_u32..50_000)) / 100.0_f64,
        notes: rng.random_bool(0.3).then(|| "Gift wrap please".to_owned()),
        order_items: Some(order_items),
        user: Some(UserRef {
            email: Some(format!("{first_name}.{}@{domain}", rng.random_range(1..100))),
            is_active: true,
        }),
    };

    if rng.random_range(0..100) >= GENUINE_PERCENT {
        let fabrication = Fabrication::ALL[rng.random_range(0..Fabrication::ALL.len())];
        fabrication.apply(&mut order, rng);
    }
    order
}
