//! Sample store data: a grocery catalog and the co-purchase relationships
//! that seed the recommendation graph.

use rust_decimal::Decimal;

use crate::domain::product::Product;

#[derive(Debug, Clone, Copy)]
pub struct ProductSeed {
    pub name: &'static str,
    pub price_minor: i64,
    pub category: &'static str,
    pub icon: &'static str,
}

impl ProductSeed {
    pub fn to_product(&self) -> Product {
        Product::new(self.name, Decimal::new(self.price_minor, 2), self.category, self.icon)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RelationshipSeed {
    pub first: &'static str,
    pub second: &'static str,
    pub weight: u32,
}

const fn product(
    name: &'static str,
    price_minor: i64,
    category: &'static str,
    icon: &'static str,
) -> ProductSeed {
    ProductSeed { name, price_minor, category, icon }
}

const fn pair(first: &'static str, second: &'static str, weight: u32) -> RelationshipSeed {
    RelationshipSeed { first, second, weight }
}

pub const PRODUCT_SEEDS: &[ProductSeed] = &[
    product("Milk - Full Cream", 6_800, "Dairy", "🥛"),
    product("Milk - Toned", 5_600, "Dairy", "🥛"),
    product("Butter - Salted", 5_800, "Dairy", "🧈"),
    product("Paneer", 9_000, "Dairy", "🧀"),
    product("Yogurt - Plain", 4_500, "Dairy", "🥣"),
    product("Onion - Red", 3_500, "Vegetables", "🧅"),
    product("Tomato", 4_000, "Vegetables", "🍅"),
    product("Potato", 3_000, "Vegetables", "🥔"),
    product("Ginger", 2_000, "Vegetables", "🫚"),
    product("Garlic", 2_500, "Vegetables", "🧄"),
    product("Green Chili", 1_000, "Vegetables", "🌶️"),
    product("Carrot", 4_500, "Vegetables", "🥕"),
    product("Bell Pepper - Red", 12_000, "Vegetables", "🫑"),
    product("Mushroom", 6_000, "Vegetables", "🍄"),
    product("Broccoli", 8_000, "Vegetables", "🥦"),
    product("Spinach", 3_000, "Vegetables", "🥬"),
    product("Cucumber", 3_000, "Vegetables", "🥒"),
    product("Lemon", 500, "Vegetables", "🍋"),
    product("Pumpkin", 4_000, "Vegetables", "🎃"),
    product("Cauliflower", 4_000, "Vegetables", "🥦"),
    product("Eggplant", 3_500, "Vegetables", "🍆"),
    product("Sweet Potato", 5_000, "Vegetables", "🍠"),
    product("Cabbage", 3_000, "Vegetables", "🥬"),
    product("Lettuce", 6_000, "Vegetables", "🥬"),
    product("Zucchini", 9_000, "Vegetables", "🥒"),
    product("Apple - Red", 18_000, "Fruits", "🍎"),
    product("Banana", 5_000, "Fruits", "🍌"),
    product("Orange", 8_000, "Fruits", "🍊"),
    product("Mango - Alphonso", 60_000, "Fruits", "🥭"),
    product("Coconut", 4_000, "Fruits", "🥥"),
    product("Moong Dal", 13_000, "Pulses", "🫘"),
    product("Toor Dal", 16_000, "Pulses", "🫘"),
    product("Chana Dal", 9_500, "Pulses", "🫘"),
    product("Kelloggs Corn Flakes", 19_500, "Breakfast", "🥣"),
    product("Kelloggs Chocos", 22_000, "Breakfast", "🥣"),
    product("Oats - Quaker", 19_900, "Breakfast", "🥣"),
    product("Granola - Mixed Nuts", 34_900, "Breakfast", "🥣"),
    product("Parle-G Biscuits", 1_000, "Snacks", "🍪"),
    product("Lays - Classic Salted", 2_000, "Snacks", "🍟"),
    product("Lays - Magic Masala", 2_000, "Snacks", "🍟"),
    product("Oreo - Original", 3_000, "Snacks", "🍪"),
    product("Dark Fantasy", 4_000, "Snacks", "🍪"),
    product("Dairy Milk", 4_000, "Chocolates", "🍫"),
    product("Dairy Milk Silk", 8_000, "Chocolates", "🍫"),
    product("KitKat", 2_500, "Chocolates", "🍫"),
    product("Ferrero Rocher", 45_000, "Chocolates", "🍫"),
];

/// Repeated pairs are intentional: the graph keeps every entry, so their
/// weights add up.
pub const RELATIONSHIP_SEEDS: &[RelationshipSeed] = &[
    pair("Milk - Full Cream", "Kelloggs Corn Flakes", 10),
    pair("Milk - Full Cream", "Kelloggs Chocos", 8),
    pair("Milk - Toned", "Oats - Quaker", 9),
    pair("Butter - Salted", "Parle-G Biscuits", 7),
    pair("Onion - Red", "Tomato", 15),
    pair("Onion - Red", "Ginger", 12),
    pair("Onion - Red", "Garlic", 11),
    pair("Tomato", "Green Chili", 10),
    pair("Ginger", "Garlic", 13),
    pair("Potato", "Onion - Red", 9),
    pair("Carrot", "Potato", 8),
    pair("Moong Dal", "Toor Dal", 7),
    pair("Toor Dal", "Onion - Red", 8),
    pair("Moong Dal", "Ginger", 6),
    pair("Chana Dal", "Onion - Red", 7),
    pair("Lays - Classic Salted", "Lays - Magic Masala", 6),
    pair("Oreo - Original", "Milk - Full Cream", 11),
    pair("Parle-G Biscuits", "Milk - Toned", 9),
    pair("Dark Fantasy", "Milk - Full Cream", 8),
    pair("Apple - Red", "Banana", 8),
    pair("Orange", "Apple - Red", 7),
    pair("Mango - Alphonso", "Banana", 6),
    pair("Paneer", "Tomato", 10),
    pair("Paneer", "Onion - Red", 9),
    pair("Yogurt - Plain", "Banana", 7),
    pair("Butter - Salted", "Parle-G Biscuits", 8),
    pair("Dairy Milk", "Dairy Milk Silk", 9),
    pair("KitKat", "Dairy Milk", 7),
    pair("Ferrero Rocher", "Dairy Milk Silk", 6),
    pair("Kelloggs Corn Flakes", "Kelloggs Chocos", 8),
    pair("Oats - Quaker", "Banana", 9),
    pair("Granola - Mixed Nuts", "Yogurt - Plain", 10),
    pair("Bell Pepper - Red", "Onion - Red", 8),
    pair("Mushroom", "Bell Pepper - Red", 7),
    pair("Broccoli", "Carrot", 6),
    pair("Spinach", "Paneer", 9),
    pair("Cucumber", "Tomato", 7),
    pair("Lemon", "Green Chili", 6),
    pair("Coconut", "Ginger", 5),
    pair("Pumpkin", "Onion - Red", 6),
    pair("Cauliflower", "Potato", 8),
    pair("Eggplant", "Tomato", 7),
    pair("Sweet Potato", "Ginger", 5),
    pair("Cabbage", "Carrot", 6),
    pair("Lettuce", "Tomato", 7),
    pair("Zucchini", "Tomato", 6),
];

pub fn sample_products() -> Vec<Product> {
    PRODUCT_SEEDS.iter().map(ProductSeed::to_product).collect()
}
