use crate::config::{MockupConfig, ModelGender};

const QUALITY_DIRECTIVES: &str = "\
- Style: Ultra-realistic, high-quality fashion photography. Maintain all original product details, logos, textures, and colors perfectly. The product must fit the model naturally and have correct perspective and alignment.
- Lighting: Professional studio lighting with balanced shadows.
- Composition: The composition should be artistic, with creative angles that highlight the product. The final image must look like a real, professional photoshoot for an e-commerce brand.
";

const NEGATIVE_DIRECTIVES: &str = "\
- Negative Keywords: Avoid low resolution, bad anatomy, weird faces, distorted limbs, blurry images, watermarks, or an artificial look.
";

/// Build the generation prompt for a configuration.
///
/// Pure and deterministic: equal configurations always produce identical
/// text. The variation count is not part of the prompt.
pub fn compile(config: &MockupConfig) -> String {
    let gender = match config.model_gender {
        ModelGender::Any => "Any gender that fits the product style",
        other => other.as_str(),
    };

    let mut prompt = format!(
        "Take the product from the provided image, which is a {}, and create a photorealistic mockup. \
         Place it on a model with the following characteristics:\n",
        config.product_type
    );

    prompt.push_str(&format!(
        "- Ethnicity: A natural-looking {} model.\n\
         - Body Type: {}.\n\
         - Pose: A dynamic and professional {}.\n\
         - Gender: {}.\n",
        config.ethnicity, config.body_type, config.pose_style, gender
    ));

    prompt.push_str(&format!(
        "\nThe overall scene should have these qualities:\n\
         - Background: A clean and suitable {} background that complements the product.\n\
         - Vibe: The image should have a {} vibe.\n",
        config.background_style, config.vibe_keywords
    ));

    prompt.push_str(QUALITY_DIRECTIVES);
    prompt.push_str(NEGATIVE_DIRECTIVES);
    prompt
}
