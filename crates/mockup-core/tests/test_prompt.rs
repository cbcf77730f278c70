use mockup_core::config::{MockupConfig, ModelGender};
use mockup_core::prompt::compile;

fn config() -> MockupConfig {
    MockupConfig {
        product_type: "hoodie".into(),
        model_gender: ModelGender::Female,
        ethnicity: "Asian".into(),
        body_type: "slim".into(),
        pose_style: "side profile".into(),
        background_style: "urban street".into(),
        vibe_keywords: "streetwear, bold".into(),
        variations: 2,
    }
}

#[test]
fn test_compile_is_deterministic() {
    assert_eq!(compile(&config()), compile(&config()));
}

#[test]
fn test_compile_ignores_variation_count() {
    let mut many = config();
    many.variations = 6;
    assert_eq!(compile(&config()), compile(&many));
}

#[test]
fn test_compile_contains_every_field() {
    let prompt = compile(&config());
    assert!(prompt.contains("which is a hoodie,"));
    assert!(prompt.contains("- Ethnicity: A natural-looking Asian model."));
    assert!(prompt.contains("- Body Type: slim."));
    assert!(prompt.contains("- Pose: A dynamic and professional side profile."));
    assert!(prompt.contains("- Gender: female."));
    assert!(prompt.contains("- Background: A clean and suitable urban street background"));
    assert!(prompt.contains("- Vibe: The image should have a streetwear, bold vibe."));
}

#[test]
fn test_compile_field_order() {
    let prompt = compile(&config());
    let order = [
        "hoodie",
        "Ethnicity:",
        "Body Type:",
        "Pose:",
        "Gender:",
        "Background:",
        "Vibe:",
        "Style:",
        "Lighting:",
        "Composition:",
        "Negative Keywords:",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|needle| prompt.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
}

#[test]
fn test_compile_any_gender_is_rewritten() {
    let mut any = config();
    any.model_gender = ModelGender::Any;
    let prompt = compile(&any);
    assert!(prompt.contains("- Gender: Any gender that fits the product style."));
    assert!(!prompt.contains("- Gender: any."));
}

#[test]
fn test_compile_male_gender() {
    let mut male = config();
    male.model_gender = ModelGender::Male;
    assert!(compile(&male).contains("- Gender: male."));
}

#[test]
fn test_compile_different_fields_differ() {
    let mut other = config();
    other.background_style = "luxury interior".into();
    assert_ne!(compile(&config()), compile(&other));
}

#[test]
fn test_compile_keywords_verbatim() {
    let mut odd = config();
    odd.vibe_keywords = "  neon,  y2k ,retro ".into();
    assert!(compile(&odd).contains("have a   neon,  y2k ,retro  vibe."));
}

#[test]
fn test_compile_ends_with_newline() {
    let prompt = compile(&MockupConfig::default());
    assert!(prompt.starts_with("Take the product from the provided image, which is a t-shirt,"));
    assert!(prompt.ends_with('\n'));
}
