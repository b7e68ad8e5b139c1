// ABOUTME: Static meal catalog grouped by anchor slot category
// ABOUTME: The fixed set of meal descriptions the generation service may choose from
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Meal Catalog
//!
//! The curated, versioned meal bank. Pure data, loaded once at startup and
//! immutable for the life of the process. The generation request embeds the
//! whole catalog and constrains the model to select from it; the engine only
//! soft-checks membership afterwards (a non-catalog meal is logged, never
//! rejected, because the upstream service is not contract-bound).

use serde_json::json;

use crate::models::MealSlot;

/// Catalog schema version, bumped whenever the meal bank changes
pub const CATALOG_VERSION: &str = "2024-06";

const BREAKFAST: &[&str] = &[
    "2 egg whites omelette + 1 multigrain toast",
    "1 bread toast + Paneer bhurji (40 g paneer + 1 tsp oil + veggies)",
    "Tofu scramble (60 g tofu + 1/2 tsp oil + veggies) + 1 toast",
    "1 bread toast + cucumber/tomato slices",
    "2 bread slices + 50 g paneer bhurji",
    "1 multigrain toast + 1 tsp peanut butter",
    "1 bread toast + 1 tsp peanut butter + 1/2 banana slices",
    "1 multigrain toast + 30 g mashed avocado",
    "1 bread toast + 30 g avocado + 2 egg whites",
    "1 bread toast + 30 g avocado/ cheese + 3 tomato slices",
    "1 bread toast + 1 tsp almond butter",
    "1 bread toast + 2 tbsp besan batter spread and grill",
    "1 bread toast + 1 tsp butter",
    "1 bread toast + 1 tsp fruit jam",
    "1 bread toast + 1 tsp malai + 1/2 tsp honey",
    "1 katori poha",
    "1 katori upma + chutney",
    "1 katori vermicelli + chutney",
    "1 moong dal chilla + chutney",
    "1 besan chilla + chutney",
    "1 oats carrot chilla + chutney",
    "1 oats zucchini chilla + chutney",
    "2 egg mushroom omelette",
    "3 eggwhite tomato cheese omelette",
    "3 eggs scrambled + sauteed bell pepper",
    "2 ragi onion dosa + chutney",
    "2 plain dosa + chutney",
    "1 uttapam + chutney",
    "2 veg idli + chutney",
    "1 methi oats ki roti + chutney + 1/2 katori Dahi",
    "1 mooli oats roti + chutney + 1/2 katori Dahi",
    "1 missi onion roti + chutney + 1/2 katori Dahi",
    "1 palak oats ki roti + chutney + 1/2 katori Dahi",
    "1 dal ki roti + chutney + 1/2 katori Dahi",
    "200 gm Papaya + 1 tsp Sesame Seeds + 1/2 katori Curd",
    "500 gm Melon + 1 glass coconut water + 1 tsp Chia Seeds",
    "1 katori Chia Seeds + 1 Apple + 1 katori Curd",
    "1 katori Oatmeal + 1 Apple or 1 cup berries",
    "1 glass veg juice + 1 katori peanut chat",
    "1 katori peanut + 50 gm Paneer chat",
];

const LUNCH: &[&str] = &[
    "1 oats roti (50 g flour) + paneer bhurji (60 g paneer + 1/2 tsp oil)",
    "1 jowar roti (50 g flour) + 3 egg whites bhurji",
    "1 oats roti (50 g flour) + tofu stir fry (80 g tofu + veggies + 1/2 tsp oil)",
    "1 katori Kadi + 1 katori Rice",
    "1 missi roti (50 g besan+wheat) + 1 katori raita",
    "1 oats roti (50 g) + 1 katori chicken curry",
    "1 oats roti (50 g) + 1 katori mutton curry",
    "1 oats roti (50 g) + 1 katori fish curry",
    "1 oats roti (50 g) + 1 katori paneer curry",
    "1 oats roti (50 g) + 1 katori rajma curry",
    "1 oats roti (50 g) + 1 katori Palak Paneer curry",
    "1 oats roti (50 g) + 1 katori mix veg",
    "2 Gobhi stuffed Roti + 1/2 katori Curd",
    "2 Aloo stuffed Roti + 1/2 katori Curd",
    "2 Paneer stuffed Roti + 1/2 katori Curd",
    "2 Mooli stuffed Roti + 1/2 katori Curd",
    "2 Methi Roti + 1/2 katori Curd",
    "1 katori arhar dal (30 g raw) + 1 katori rice (80 g cooked)",
    "2 katori Sabut Masar dal (30 g raw) + Salad",
    "2 katori Sabut Moong dal (30 g raw) + Salad",
    "1 katori rajma curry (60 g cooked) + 1/2 katori rice (80 g cooked)",
    "1 katori chole curry (60 g cooked) + 1/2 katori rice (80 g cooked)",
    "1 katori rice (80 g cooked) + 1/2 katori curd (100 g) + tadka",
    "1 katori Sambar + Rice / Idli",
    "1 katori Veg Oats + Salad",
    "1 Paneer Wrap",
    "1 Chicken Wrap",
    "1 Paneer Sandwich",
    "1 Chicken Sandwich",
    "1 katori Pulao + 1/2 katori Curd",
    "1 katori Chicken Biryani + 1/2 katori Curd",
    "2 plain dosa + chutney",
    "1 uttapam + chutney",
    "100 gm Grilled Paneer + 1 katori beetroot raita",
    "1 small kulcha + 1/2 katori matar curry",
    "Veg Burger - Small wholewheat bun + aloo tikki + salad",
    "Aloo Tikki - 1 medium tikki + chutney",
    "Vada Pav - 1 pav + batata vada",
    "Veg Kathi Roll - 1 roti + paneer/veg filling + chutney",
    "Mini Pao Bhaji - 1 pav + 1/2 katori bhaji",
    "Sabut Moong Dal Salad - 50 g raw moong (100 g cooked) + onion + tomato",
    "Kala Chana Salad - 50 g raw chana (100 g cooked) + cucumber + tomato",
    "White Lobia Salad - 50 g raw lobia (100 g cooked) + cucumber + onion",
    "Paneer Salad - 40 g paneer + cucumber + tomato",
    "Tofu Salad - 50 g tofu + lettuce + capsicum + sesame dressing",
    "Nut & Seed Salad - 8 almonds + 1 tsp seeds + 2 cucumber",
    "Egg White Salad - 2 boiled egg whites + cucumber + tomato",
    "Chicken Salad - 80 g grilled chicken + lettuce + cucumber",
];

const DINNER: &[&str] = &[
    "1 bowl Ragi mix veg soup + 1 bread toast",
    "1 katori Papaya bowl",
    "1 bowl Clear veg soup + 50 g paneer",
    "1 bowl Ghiya-tomato soup",
    "1 bowl Soup + sauteed paneer / 2 eggwhite",
    "1 katori Papaya bowl + 1 tsp pumpkin seeds",
    "100 gm Grilled paneer + salad",
    "3 Egg white bhurji + 1 bread toast",
    "2 slices Mushroom cheese sandwich",
    "1 katori Zucchini pasta",
    "1 bowl Vegetable soup + 1 multigrain toast",
    "1 bowl Ghiya tomato soup + 2 sourdough toast",
    "1 katori Steamed vegetables (light masala)",
    "1 bowl Clear veg soup",
    "1 katori sauteed veggies",
    "50 gm Sauteed paneer + 1 katori sauteed veg",
    "1 katori Milk Oats",
    "2 katori Tomato rasam",
    "1 bowl Clear lauki soup",
    "1 bowl Palak paneer",
    "100 gms chilli garlic Mushroom",
    "1 bowl Ghiya-tomato soup + 1 sourdough toast",
    "1 bowl Carrot-beet soup",
    "1 katori Ragi porridge (salted/buttermilk)",
    "1/2 katori rice + 1/2 katori curd",
    "1 bowl Moong Ghiya soup + 1 katori veg",
    "1 bowl Pumpkin soup",
    "50 g roasted Paneer tikka",
    "1 bowl Sauteed beans + Grilled Paneer (50gm)",
    "1 bowl Tomato-capsicum soup + 1 toast",
    "1 bowl Pumpkin-tomato soup + 2 eggwhite or Paneer 40 gms",
    "3 eggwhite any form",
    "100 gms Chicken Tikka",
    "1 bowl Chicken Soup",
    "1 bowl Mushroom Soup + 1 Toast",
    "Papaya Coconut Milk Smoothie - Papaya 100 g + 150 ml coconut milk",
    "Coconut Milk Smoothie - 150 ml coconut milk + 1/2 banana",
    "Sabut Moong Dal Salad - 50 g raw moong (100 g cooked) + onion + tomato",
    "Kala Chana Salad - 50 g raw chana (100 g cooked) + cucumber + tomato",
    "White Lobia Salad - 50 g raw lobia (100 g cooked) + cucumber + onion",
    "Paneer Salad - 40 g paneer + cucumber + tomato",
    "Tofu Salad - 50 g tofu + lettuce + capsicum + sesame dressing",
    "Nut & Seed Salad - 8 almonds + 1 tsp seeds + 2 cucumber",
    "Egg White Salad - 2 boiled egg whites + cucumber + tomato",
    "Chicken Salad - 80 g grilled chicken + lettuce + cucumber",
];

/// The process-wide meal catalog
#[derive(Debug, Clone, Copy)]
pub struct MealCatalog {
    breakfast: &'static [&'static str],
    lunch: &'static [&'static str],
    dinner: &'static [&'static str],
}

/// The one catalog instance; read-only and freely shared
pub const MEAL_CATALOG: MealCatalog = MealCatalog {
    breakfast: BREAKFAST,
    lunch: LUNCH,
    dinner: DINNER,
};

impl MealCatalog {
    /// Candidate meals for an anchor slot; `None` for constant slots
    #[must_use]
    pub fn for_slot(&self, slot: MealSlot) -> Option<&'static [&'static str]> {
        match slot {
            MealSlot::Breakfast => Some(self.breakfast),
            MealSlot::Lunch => Some(self.lunch),
            MealSlot::Dinner => Some(self.dinner),
            _ => None,
        }
    }

    /// Whether a meal string appears verbatim in the given anchor category
    #[must_use]
    pub fn contains(&self, slot: MealSlot, meal: &str) -> bool {
        self.for_slot(slot)
            .is_some_and(|meals| meals.contains(&meal))
    }

    /// Total number of catalog entries across the three categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.breakfast.len() + self.lunch.len() + self.dinner.len()
    }

    /// Whether the catalog is empty (never true for the shipped bank)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the catalog as the JSON blob embedded in generation prompts
    #[must_use]
    pub fn to_prompt_json(&self) -> String {
        let value = json!({
            "breakfast": self.breakfast,
            "lunch": self.lunch,
            "dinner": self.dinner,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
    }
}
