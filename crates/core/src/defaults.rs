//! Built-in menu used to seed an empty or unreadable catalog.

use rust_decimal::Decimal;

use crate::types::{Category, NutritionInfo, Product, ProductId, SizeOption};

/// Image used for products created without one.
pub const DEFAULT_PRODUCT_IMAGE: &str =
    "https://images.unsplash.com/photo-1546069901-ba9599a7e63c?w=800";

/// Price from a cent amount.
fn cents(amount: i64) -> Decimal {
    Decimal::new(amount, 2)
}

struct Seed {
    id: i32,
    name: &'static str,
    category: Category,
    image: &'static str,
    description: &'static str,
    ingredients: &'static [&'static str],
    nutrition: (i32, &'static str, &'static str, &'static str),
    sizes: &'static [(&'static str, i64)],
    tags: &'static [&'static str],
    rating_tenths: i64,
    reviews: u32,
    popular: bool,
    is_new: bool,
}

impl Seed {
    fn build(&self) -> Product {
        let sizes: Vec<SizeOption> = self
            .sizes
            .iter()
            .map(|&(label, price)| SizeOption {
                label: label.to_owned(),
                price: cents(price),
            })
            .collect();
        let (calories, protein, carbs, fat) = self.nutrition;
        Product {
            id: ProductId::new(self.id),
            name: self.name.to_owned(),
            category: self.category,
            price: sizes.first().map_or(Decimal::ZERO, |s| s.price),
            image: self.image.to_owned(),
            description: self.description.to_owned(),
            ingredients: self.ingredients.iter().map(|s| (*s).to_owned()).collect(),
            nutrition_info: NutritionInfo {
                calories,
                protein: protein.to_owned(),
                carbs: carbs.to_owned(),
                fat: fat.to_owned(),
            },
            sizes,
            tags: self.tags.iter().map(|s| (*s).to_owned()).collect(),
            rating: Decimal::new(self.rating_tenths, 1),
            review_count: self.reviews,
            popular: self.popular,
            is_new: self.is_new,
        }
    }
}

const SEEDS: &[Seed] = &[
    Seed {
        id: 1,
        name: "Fresh Orange Burst",
        category: Category::Juices,
        image: "https://images.unsplash.com/photo-1734773557735-8fc50f94b473?w=1080",
        description: "Pure, freshly squeezed orange juice packed with vitamin C and natural sweetness.",
        ingredients: &["100% Fresh Oranges", "No Added Sugar", "No Preservatives"],
        nutrition: (112, "2g", "26g", "0.5g"),
        sizes: &[("250ml", 599), ("500ml", 999), ("1L", 1699)],
        tags: &["Vegan", "Gluten-Free", "Vitamin C Rich"],
        rating_tenths: 48,
        reviews: 124,
        popular: true,
        is_new: false,
    },
    Seed {
        id: 2,
        name: "Green Detox",
        category: Category::Juices,
        image: "https://images.unsplash.com/photo-1610970881699-44a5587cabec?w=800",
        description: "A powerful blend of kale, spinach, cucumber, apple, and lemon for ultimate detoxification.",
        ingredients: &["Kale", "Spinach", "Cucumber", "Green Apple", "Lemon", "Ginger"],
        nutrition: (85, "3g", "18g", "0.8g"),
        sizes: &[("250ml", 799), ("500ml", 1399), ("1L", 2299)],
        tags: &["Vegan", "Organic", "Detox", "Low-Calorie"],
        rating_tenths: 49,
        reviews: 203,
        popular: true,
        is_new: false,
    },
    Seed {
        id: 3,
        name: "Tropical Paradise",
        category: Category::Juices,
        image: "https://images.unsplash.com/photo-1600271886742-f049cd451bba?w=800",
        description: "A refreshing mix of pineapple, mango, and passion fruit that transports you to the tropics.",
        ingredients: &["Pineapple", "Mango", "Passion Fruit", "Orange", "Coconut Water"],
        nutrition: (135, "1.5g", "32g", "0.4g"),
        sizes: &[("250ml", 699), ("500ml", 1199), ("1L", 1999)],
        tags: &["Vegan", "Tropical", "Vitamin C Rich"],
        rating_tenths: 47,
        reviews: 98,
        popular: false,
        is_new: true,
    },
    Seed {
        id: 4,
        name: "Berry Blast",
        category: Category::Juices,
        image: "https://images.unsplash.com/photo-1553530666-ba11a7da3888?w=800",
        description: "A delicious mix of strawberries, blueberries, and raspberries loaded with antioxidants.",
        ingredients: &["Strawberries", "Blueberries", "Raspberries", "Blackberries", "Apple"],
        nutrition: (98, "1.8g", "23g", "0.6g"),
        sizes: &[("250ml", 649), ("500ml", 1099), ("1L", 1899)],
        tags: &["Vegan", "Antioxidant Rich", "Berry"],
        rating_tenths: 48,
        reviews: 156,
        popular: false,
        is_new: false,
    },
    Seed {
        id: 5,
        name: "Protein Power Smoothie",
        category: Category::Smoothies,
        image: "https://images.unsplash.com/photo-1592503469446-7c9a9f55b5ce?w=1080",
        description: "A thick, creamy smoothie packed with plant-based protein and superfoods.",
        ingredients: &["Banana", "Peanut Butter", "Oat Milk", "Chia Seeds", "Protein Powder", "Honey"],
        nutrition: (285, "18g", "38g", "9g"),
        sizes: &[("350ml", 899), ("500ml", 1299)],
        tags: &["High-Protein", "Post-Workout", "Energy Boost"],
        rating_tenths: 49,
        reviews: 187,
        popular: true,
        is_new: false,
    },
    Seed {
        id: 6,
        name: "Acai Berry Bowl",
        category: Category::Smoothies,
        image: "https://images.unsplash.com/photo-1590301157890-4810ed352733?w=800",
        description: "Thick acai smoothie topped with granola, fresh fruits, and coconut flakes.",
        ingredients: &["Acai Puree", "Banana", "Blueberries", "Granola", "Coconut Flakes", "Honey"],
        nutrition: (325, "8g", "58g", "11g"),
        sizes: &[("Regular", 999), ("Large", 1399)],
        tags: &["Antioxidant Rich", "Superfood", "Instagram-Worthy"],
        rating_tenths: 50,
        reviews: 241,
        popular: true,
        is_new: false,
    },
    Seed {
        id: 7,
        name: "Mango Madness",
        category: Category::Smoothies,
        image: "https://images.unsplash.com/photo-1505252585461-04db1eb84625?w=800",
        description: "Creamy mango smoothie with a hint of turmeric for anti-inflammatory benefits.",
        ingredients: &["Mango", "Banana", "Coconut Milk", "Turmeric", "Ginger", "Orange Juice"],
        nutrition: (210, "3g", "45g", "5g"),
        sizes: &[("350ml", 799), ("500ml", 1199)],
        tags: &["Vegan", "Anti-Inflammatory", "Tropical"],
        rating_tenths: 47,
        reviews: 92,
        popular: false,
        is_new: false,
    },
    Seed {
        id: 8,
        name: "Chocolate Peanut Butter Dream",
        category: Category::Smoothies,
        image: "https://images.unsplash.com/photo-1623065422902-30a2d299bbe4?w=800",
        description: "Indulgent yet healthy chocolate smoothie with rich peanut butter.",
        ingredients: &["Banana", "Cacao Powder", "Peanut Butter", "Almond Milk", "Dates", "Vanilla"],
        nutrition: (295, "12g", "42g", "11g"),
        sizes: &[("350ml", 849), ("500ml", 1249)],
        tags: &["Vegan", "Dessert-Like", "High-Protein"],
        rating_tenths: 48,
        reviews: 134,
        popular: false,
        is_new: true,
    },
    Seed {
        id: 9,
        name: "Greek Yogurt Parfait",
        category: Category::Parfaits,
        image: "https://images.unsplash.com/photo-1488477181946-6428a0291777?w=800",
        description: "Layers of creamy Greek yogurt, honey, granola, and fresh berries.",
        ingredients: &["Greek Yogurt", "Honey", "Granola", "Strawberries", "Blueberries", "Almonds"],
        nutrition: (245, "14g", "35g", "7g"),
        sizes: &[("Regular", 699), ("Large", 999)],
        tags: &["High-Protein", "Breakfast", "Probiotic"],
        rating_tenths: 48,
        reviews: 178,
        popular: true,
        is_new: false,
    },
    Seed {
        id: 10,
        name: "Tropical Chia Parfait",
        category: Category::Parfaits,
        image: "https://images.unsplash.com/photo-1511688878353-3a2f5be94cd7?w=800",
        description: "Chia pudding layered with tropical fruits and coconut yogurt.",
        ingredients: &["Chia Seeds", "Coconut Yogurt", "Mango", "Pineapple", "Coconut Flakes", "Mint"],
        nutrition: (215, "8g", "32g", "8g"),
        sizes: &[("Regular", 749), ("Large", 1049)],
        tags: &["Vegan", "Omega-3 Rich", "Tropical"],
        rating_tenths: 46,
        reviews: 89,
        popular: false,
        is_new: false,
    },
    Seed {
        id: 11,
        name: "Classic Chicken Shawarma",
        category: Category::Shawarma,
        image: "https://images.unsplash.com/photo-1529006557810-274b9b2fc783?w=800",
        description: "Marinated grilled chicken with fresh vegetables, pickles, and tahini sauce in warm pita.",
        ingredients: &["Grilled Chicken", "Pita Bread", "Lettuce", "Tomato", "Pickles", "Tahini Sauce", "Garlic Sauce"],
        nutrition: (485, "32g", "48g", "18g"),
        sizes: &[("Regular", 999), ("Large", 1399)],
        tags: &["High-Protein", "Lunch", "Mediterranean"],
        rating_tenths: 49,
        reviews: 267,
        popular: true,
        is_new: false,
    },
    Seed {
        id: 12,
        name: "Falafel Shawarma",
        category: Category::Shawarma,
        image: "https://images.unsplash.com/photo-1626804475297-41608ea09aeb?w=800",
        description: "Crispy falafel with fresh vegetables, hummus, and tahini in warm pita.",
        ingredients: &["Falafel", "Pita Bread", "Hummus", "Lettuce", "Tomato", "Cucumber", "Tahini", "Pickled Turnips"],
        nutrition: (420, "16g", "52g", "16g"),
        sizes: &[("Regular", 899), ("Large", 1299)],
        tags: &["Vegan", "Plant-Based", "Mediterranean"],
        rating_tenths: 47,
        reviews: 152,
        popular: false,
        is_new: true,
    },
    Seed {
        id: 13,
        name: "Mediterranean Quinoa Bowl",
        category: Category::Salads,
        image: "https://images.unsplash.com/photo-1720022477040-685f8c3a01be?w=1080",
        description: "Fluffy quinoa with cherry tomatoes, cucumber, olives, feta cheese, and lemon dressing.",
        ingredients: &["Quinoa", "Cherry Tomatoes", "Cucumber", "Red Onion", "Kalamata Olives", "Feta Cheese", "Lemon Vinaigrette"],
        nutrition: (385, "14g", "45g", "16g"),
        sizes: &[("Regular", 1099), ("Large", 1499)],
        tags: &["Vegetarian", "High-Protein", "Mediterranean"],
        rating_tenths: 49,
        reviews: 198,
        popular: true,
        is_new: false,
    },
    Seed {
        id: 14,
        name: "Caesar Salad with Grilled Chicken",
        category: Category::Salads,
        image: "https://images.unsplash.com/photo-1546793665-c74683f339c1?w=800",
        description: "Classic Caesar salad with romaine lettuce, parmesan, croutons, and grilled chicken.",
        ingredients: &["Romaine Lettuce", "Grilled Chicken", "Parmesan Cheese", "Croutons", "Caesar Dressing"],
        nutrition: (425, "35g", "22g", "22g"),
        sizes: &[("Regular", 1199), ("Large", 1599)],
        tags: &["High-Protein", "Classic", "Lunch"],
        rating_tenths: 48,
        reviews: 224,
        popular: false,
        is_new: false,
    },
    Seed {
        id: 15,
        name: "Rainbow Power Salad",
        category: Category::Salads,
        image: "https://images.unsplash.com/photo-1512621776951-a57141f2eefd?w=800",
        description: "A vibrant mix of kale, purple cabbage, carrots, beets, and edamame with ginger dressing.",
        ingredients: &["Kale", "Purple Cabbage", "Carrots", "Beets", "Edamame", "Sunflower Seeds", "Ginger Dressing"],
        nutrition: (295, "12g", "35g", "12g"),
        sizes: &[("Regular", 999), ("Large", 1399)],
        tags: &["Vegan", "Nutrient-Dense", "Colorful"],
        rating_tenths: 47,
        reviews: 143,
        popular: false,
        is_new: false,
    },
];

/// The built-in catalog, freshly allocated.
#[must_use]
pub fn default_catalog() -> Vec<Product> {
    SEEDS.iter().map(Seed::build).collect()
}
