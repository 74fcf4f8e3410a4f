//! Curated gallery and things-to-do content served to the public site.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use ts_rs::TS;

/// Query value meaning "no filter".
pub const ALL_CATEGORIES: &str = "All";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, Display, EnumString, EnumIter,
)]
pub enum GalleryCategory {
    Room,
    Nature,
    Activities,
    Food,
    Resort,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct GalleryImage {
    pub src: String,
    pub alt: String,
    pub category: GalleryCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub image: String,
    pub description: String,
    pub highlights: Vec<String>,
}

const UNSPLASH: &str = "https://images.unsplash.com";

const GALLERY: [(&str, &str, GalleryCategory); 15] = [
    ("photo-1506905925346-21bda4d32df4", "Vagamon Hills", GalleryCategory::Nature),
    ("photo-1441974231531-c6227db76b6e", "Pine Forest", GalleryCategory::Nature),
    ("photo-1470071459604-3b5ec3a7fe05", "Mountain View", GalleryCategory::Nature),
    ("photo-1501594907352-04cda38ebc29", "Tea Estates", GalleryCategory::Nature),
    ("photo-1520250497591-112f2f40a3f4", "Resort Room", GalleryCategory::Room),
    ("photo-1611892440504-42a792e24d32", "Luxury Suite", GalleryCategory::Room),
    ("photo-1566073771259-6a8506099945", "Resort Balcony", GalleryCategory::Room),
    ("photo-1551524164-6cf77f5e7f8e", "Paragliding", GalleryCategory::Activities),
    ("photo-1511497584788-876760111969", "Jeep Safari", GalleryCategory::Activities),
    ("photo-1555939594-58d7cb561ad1", "Resort Dining", GalleryCategory::Food),
    ("photo-1414235077428-338989a2e8c0", "Breakfast Spread", GalleryCategory::Food),
    ("photo-1564501049412-61c2a3083791", "Resort Exterior", GalleryCategory::Resort),
    ("photo-1571896349842-33c89424de2d", "Resort Lobby", GalleryCategory::Resort),
    ("photo-1590490360182-c33d57733427", "Resort Garden", GalleryCategory::Resort),
    ("photo-1578683010236-d716f9a3f461", "Campfire", GalleryCategory::Activities),
];

struct ActivitySource {
    id: &'static str,
    title: &'static str,
    photo: &'static str,
    description: &'static str,
    highlights: [&'static str; 4],
}

const ACTIVITIES: [ActivitySource; 6] = [
    ActivitySource {
        id: "paragliding",
        title: "Paragliding in Vagamon",
        photo: "photo-1551524164-6cf77f5e7f8e",
        description: "Fly over the hills and meadows of Vagamon with certified instructors. One of the most popular adventure activities in the region, with aerial views of the whole landscape for beginners and experienced flyers alike.",
        highlights: [
            "Certified instructors",
            "Safety equipment provided",
            "Aerial views of hills and meadows",
            "Suitable for beginners",
        ],
    },
    ActivitySource {
        id: "meadows",
        title: "Vagamon Meadows",
        photo: "photo-1506905925346-21bda4d32df4",
        description: "Rolling green meadows made for picnics, nature walks and photography. During the monsoon they turn into a lush carpet, ideal for bird watching or simply relaxing in the open air.",
        highlights: [
            "Perfect for picnics",
            "Nature walks and bird watching",
            "Photography opportunities",
            "Peaceful and serene atmosphere",
        ],
    },
    ActivitySource {
        id: "pine-forest",
        title: "Pine Forest",
        photo: "photo-1441974231531-c6227db76b6e",
        description: "Tall pines keep the forest cool and shaded for leisurely walks. Home to many bird species and a quiet spot for meditation and nature photography.",
        highlights: [
            "Cool and shaded environment",
            "Bird watching opportunities",
            "Nature photography",
            "Peaceful walking trails",
        ],
    },
    ActivitySource {
        id: "jeep-safari",
        title: "Off-road Jeep Safari",
        photo: "photo-1511497584788-876760111969",
        description: "An off-road ride over rugged terrain, through tea plantations and up to hidden viewpoints that are otherwise out of reach.",
        highlights: [
            "Scenic off-road routes",
            "Visit hidden viewpoints",
            "Explore tea plantations",
            "Adventure-filled experience",
        ],
    },
    ActivitySource {
        id: "tea-estates",
        title: "Tea Estates and Plantations",
        photo: "photo-1501594907352-04cda38ebc29",
        description: "Guided tours of the surrounding tea estates show how tea is grown and processed, finishing with a tasting of fresh tea against a backdrop of green hills.",
        highlights: [
            "Guided plantation tours",
            "Tea processing demonstrations",
            "Fresh tea tasting",
            "Picturesque landscapes",
        ],
    },
    ActivitySource {
        id: "waterfalls",
        title: "Waterfalls and Viewpoints",
        photo: "photo-1470071459604-3b5ec3a7fe05",
        description: "Waterfalls and lookouts with panoramic views over the hills and valleys, at their best at sunrise and sunset.",
        highlights: [
            "Panoramic hill views",
            "Beautiful waterfalls",
            "Sunrise and sunset views",
            "Photography opportunities",
        ],
    },
];

fn image_url(photo: &str) -> String {
    format!("{UNSPLASH}/{photo}?w=1200")
}

/// Filter values accepted by the gallery, `All` first.
pub fn gallery_categories() -> Vec<String> {
    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(GalleryCategory::iter().map(|c| c.to_string()))
        .collect()
}

/// Gallery images in display order. `None` and `All` return everything; a
/// category that does not exist matches nothing.
pub fn gallery(category: Option<&str>) -> Vec<GalleryImage> {
    let wanted = match category.map(str::trim) {
        None | Some("") | Some(ALL_CATEGORIES) => None,
        Some(raw) => match raw.parse::<GalleryCategory>() {
            Ok(category) => Some(category),
            Err(_) => return Vec::new(),
        },
    };

    GALLERY
        .iter()
        .filter(|(_, _, c)| wanted.is_none_or(|w| w == *c))
        .map(|&(photo, alt, category)| GalleryImage {
            src: image_url(photo),
            alt: alt.to_string(),
            category,
        })
        .collect()
}

pub fn things_to_do() -> Vec<Activity> {
    ACTIVITIES
        .iter()
        .map(|a| Activity {
            id: a.id.to_string(),
            title: a.title.to_string(),
            image: image_url(a.photo),
            description: a.description.to_string(),
            highlights: a.highlights.iter().map(|h| h.to_string()).collect(),
        })
        .collect()
}
