//! Fixed skill catalog: categories, complements, learning paths, trending list.
//!
//! Lookups are case-insensitive on trimmed input.

/// Category name returned for skills outside every category.
pub const OTHER_CATEGORY: &str = "Other";

const MAX_SUGGESTIONS: usize = 5;

const SKILL_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Programming",
        &[
            "python", "javascript", "java", "c++", "html", "css", "react", "node.js", "sql", "git",
            "docker", "kubernetes",
        ],
    ),
    (
        "Design",
        &[
            "photoshop",
            "illustrator",
            "figma",
            "sketch",
            "ui/ux",
            "graphic design",
            "web design",
            "logo design",
            "branding",
            "typography",
        ],
    ),
    (
        "Data & Analytics",
        &[
            "data science",
            "machine learning",
            "excel",
            "power bi",
            "tableau",
            "statistics",
            "r",
            "data analysis",
            "sql",
            "big data",
        ],
    ),
    (
        "Marketing",
        &[
            "digital marketing",
            "seo",
            "social media",
            "content marketing",
            "copywriting",
            "email marketing",
            "ppc",
            "analytics",
        ],
    ),
    (
        "Creative",
        &[
            "photography",
            "video editing",
            "writing",
            "drawing",
            "painting",
            "music production",
            "guitar",
            "piano",
            "singing",
        ],
    ),
    (
        "Business",
        &[
            "project management",
            "leadership",
            "sales",
            "negotiation",
            "accounting",
            "finance",
            "consulting",
            "strategy",
        ],
    ),
    (
        "Languages",
        &[
            "spanish",
            "french",
            "german",
            "chinese",
            "japanese",
            "italian",
            "portuguese",
            "translation",
            "interpretation",
        ],
    ),
    (
        "Health & Fitness",
        &[
            "yoga",
            "fitness",
            "nutrition",
            "meditation",
            "personal training",
            "cooking",
            "baking",
            "health coaching",
        ],
    ),
    (
        "Education",
        &[
            "teaching",
            "tutoring",
            "curriculum design",
            "e-learning",
            "presentation skills",
            "public speaking",
            "mentoring",
        ],
    ),
    (
        "Technical",
        &[
            "network administration",
            "cybersecurity",
            "cloud computing",
            "devops",
            "system administration",
            "troubleshooting",
        ],
    ),
];

const SKILL_COMPLEMENTS: &[(&str, &[&str])] = &[
    ("python", &["data science", "machine learning", "web development", "automation"]),
    ("javascript", &["react", "node.js", "vue.js", "typescript", "web design"]),
    ("html", &["css", "javascript", "web design", "ui/ux"]),
    ("css", &["html", "javascript", "web design", "sass"]),
    ("photoshop", &["illustrator", "graphic design", "ui/ux", "photography"]),
    ("excel", &["data analysis", "vba", "power bi", "sql"]),
    ("marketing", &["content writing", "seo", "social media", "analytics"]),
    ("guitar", &["music theory", "piano", "songwriting", "recording"]),
    ("cooking", &["baking", "nutrition", "food photography", "recipe writing"]),
    ("writing", &["editing", "content marketing", "copywriting", "blogging"]),
    ("photography", &["photoshop", "lightroom", "video editing", "composition"]),
    ("drawing", &["painting", "digital art", "illustration", "graphic design"]),
    ("yoga", &["meditation", "fitness", "nutrition", "mindfulness"]),
    ("spanish", &["portuguese", "french", "translation", "teaching"]),
    ("data science", &["python", "r", "sql", "machine learning", "statistics"]),
    ("web development", &["javascript", "react", "node.js", "databases"]),
    ("graphic design", &["photoshop", "illustrator", "branding", "ui/ux"]),
    (
        "video editing",
        &["motion graphics", "sound editing", "storytelling", "photography"],
    ),
    ("social media", &["content creation", "marketing", "copywriting", "analytics"]),
    ("fitness", &["nutrition", "yoga", "personal training", "health coaching"]),
];

struct LearningPath {
    target: &'static str,
    prerequisites: &'static [&'static str],
    intermediate: &'static [&'static str],
}

const LEARNING_PATHS: &[LearningPath] = &[
    LearningPath {
        target: "machine learning",
        prerequisites: &["python", "statistics", "data analysis"],
        intermediate: &["pandas", "numpy", "scikit-learn"],
    },
    LearningPath {
        target: "web development",
        prerequisites: &["html", "css"],
        intermediate: &["javascript", "responsive design"],
    },
    LearningPath {
        target: "data science",
        prerequisites: &["statistics", "excel"],
        intermediate: &["python", "sql", "data visualization"],
    },
    LearningPath {
        target: "ui/ux design",
        prerequisites: &["design principles", "psychology"],
        intermediate: &["figma", "prototyping", "user research"],
    },
    LearningPath {
        target: "digital marketing",
        prerequisites: &["marketing basics", "content writing"],
        intermediate: &["seo", "social media", "analytics"],
    },
];

const TRENDING_SKILLS: &[&str] = &[
    "artificial intelligence",
    "machine learning",
    "data science",
    "cloud computing",
    "cybersecurity",
    "blockchain",
    "ui/ux design",
    "react",
    "python",
    "digital marketing",
    "content creation",
    "video editing",
    "remote work skills",
    "project management",
    "sustainability",
];

fn lowered<S: AsRef<str>>(skills: &[S]) -> Vec<String> {
    skills
        .iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .collect()
}

/// Category name and member skills, in display order.
pub fn skill_categories() -> &'static [(&'static str, &'static [&'static str])] {
    SKILL_CATEGORIES
}

/// First category listing `skill`, or [`OTHER_CATEGORY`].
pub fn categorize_skill(skill: &str) -> &'static str {
    let skill = skill.trim().to_lowercase();
    SKILL_CATEGORIES
        .iter()
        .find(|(_, skills)| skills.contains(&skill.as_str()))
        .map(|(category, _)| *category)
        .unwrap_or(OTHER_CATEGORY)
}

/// Up to five skills that pair well with `user_skills`.
///
/// Suggestions keep first-seen order and skip anything the user already has
/// or wants.
pub fn complementary_skills<A: AsRef<str>, B: AsRef<str>>(
    user_skills: &[A],
    wanted_skills: &[B],
) -> Vec<String> {
    let known = lowered(user_skills);
    let wanted = lowered(wanted_skills);
    let mut suggestions: Vec<String> = Vec::new();

    for skill in &known {
        let Some((_, complements)) = SKILL_COMPLEMENTS
            .iter()
            .find(|(key, _)| *key == skill.as_str())
        else {
            continue;
        };

        for complement in complements.iter().map(|c| c.to_string()) {
            if !known.contains(&complement)
                && !wanted.contains(&complement)
                && !suggestions.contains(&complement)
            {
                suggestions.push(complement);
            }
        }
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

/// Missing prerequisites, then intermediate steps, towards `target`.
///
/// Empty when no path is known for `target`.
pub fn suggest_learning_path<S: AsRef<str>>(current_skills: &[S], target: &str) -> Vec<String> {
    let target = target.trim().to_lowercase();
    let Some(path) = LEARNING_PATHS.iter().find(|p| p.target == target) else {
        return vec![];
    };

    let known = lowered(current_skills);
    path.prerequisites
        .iter()
        .chain(path.intermediate)
        .map(|s| s.to_string())
        .filter(|s| !known.contains(s))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Skills currently in demand, most notable first.
pub fn trending_skills() -> &'static [&'static str] {
    TRENDING_SKILLS
}
