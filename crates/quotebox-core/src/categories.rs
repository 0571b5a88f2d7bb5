// Static category lists. These match what the primary API accepts; nothing
// here is fetched.

/// Every category the primary API knows about
pub const AVAILABLE_CATEGORIES: [&str; 67] = [
    "age", "alone", "amazing", "anger", "architecture", "art", "attitude", "beauty",
    "best", "birthday", "business", "car", "change", "communication", "computers",
    "cool", "courage", "dad", "dating", "death", "design", "dreams", "education",
    "environmental", "equality", "experience", "failure", "faith", "family", "famous",
    "fear", "fitness", "food", "forgiveness", "freedom", "friendship", "funny",
    "future", "god", "good", "government", "graduation", "great", "happiness",
    "health", "history", "home", "hope", "humor", "imagination", "inspirational",
    "intelligence", "jealousy", "knowledge", "leadership", "learning", "legal", "life",
    "love", "marriage", "medical", "men", "mom", "money", "morning", "movies",
    "success",
];

/// Featured categories shown up front
///
/// Note "motivational" and "wisdom" aren't in the full list; the API still
/// answers for them, usually with an empty array.
pub const POPULAR_CATEGORIES: [&str; 8] = [
    "inspirational",
    "motivational",
    "success",
    "happiness",
    "life",
    "love",
    "friendship",
    "wisdom",
];

pub fn is_known_category(name: &str) -> bool {
    let name = name.trim().to_lowercase();
    AVAILABLE_CATEGORIES.contains(&name.as_str()) || POPULAR_CATEGORIES.contains(&name.as_str())
}
