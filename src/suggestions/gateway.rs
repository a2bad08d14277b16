use serde_json::Value;
use std::env;

use crate::providers::gemini::GeminiProvider;
use crate::providers::traits::CompletionProvider;
use crate::suggestions::error::SuggestionError;
use crate::suggestions::parse::extract_json;
use crate::suggestions::types::{
    DetailedRecipe, ExerciseParams, ExerciseSuggestion, Ingredient, MealSuggestion, RecipeVideo,
};

const SYSTEM_MESSAGE: &str =
    "You are a nutrition and fitness assistant that always answers in the exact format requested.";

/// Front door for all AI-backed suggestions. Holds the provider when a
/// credential was available at startup; without one, every operation
/// fails fast with `ServiceUnavailable` and never touches the network.
pub struct SuggestionGateway {
    provider: Option<Box<dyn CompletionProvider + Send + Sync>>,
}

impl SuggestionGateway {
    pub fn new(provider: Box<dyn CompletionProvider + Send + Sync>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub fn unavailable() -> Self {
        Self { provider: None }
    }

    /// Builds the gateway from `GEMINI_API_KEY`. A missing key is not
    /// an error here; it just disables the suggestion features.
    pub async fn from_env() -> Self {
        let api_key = match env::var("GEMINI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                log::warn!("GEMINI_API_KEY is not set; suggestion features are disabled");
                return Self::unavailable();
            }
        };

        Self::with_api_key(api_key).await
    }

    pub async fn with_api_key(api_key: String) -> Self {
        match GeminiProvider::new(api_key, SYSTEM_MESSAGE.to_string()).await {
            Ok(provider) => Self::new(Box::new(provider)),
            Err(e) => {
                log::error!("Failed to initialize Gemini provider: {}", e);
                Self::unavailable()
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    fn provider(&self) -> Result<&(dyn CompletionProvider + Send + Sync), SuggestionError> {
        self.provider
            .as_deref()
            .ok_or(SuggestionError::ServiceUnavailable)
    }

    async fn request_json(
        &self,
        operation: &'static str,
        prompt: &str,
    ) -> Result<Value, SuggestionError> {
        let provider = self.provider()?;
        let text = provider
            .complete_json(prompt)
            .await
            .map_err(|e| SuggestionError::Transport {
                operation,
                message: e.to_string(),
            })?;
        extract_json(&text)
    }

    /// Asks for exactly 3 meal ideas built from the given ingredients.
    /// Items missing a string mealName/description are dropped; a
    /// non-empty array in which nothing survives is a shape error.
    pub async fn suggest_meals(
        &self,
        ingredients: &str,
    ) -> Result<Vec<MealSuggestion>, SuggestionError> {
        let parsed = self
            .request_json("meal suggestion", &meal_prompt(ingredients))
            .await?;

        let items = parsed
            .as_array()
            .ok_or(SuggestionError::UnexpectedShape("meal suggestion list"))?;

        let meals: Vec<MealSuggestion> = items.iter().filter_map(meal_from_value).collect();
        if meals.is_empty() && !items.is_empty() {
            log::warn!("All {} meal items failed shape validation", items.len());
            return Err(SuggestionError::UnexpectedShape("meal suggestion list"));
        }

        Ok(meals)
    }

    /// Full recipe for a previously suggested meal. All-or-nothing:
    /// one malformed ingredient or step rejects the whole response.
    pub async fn detailed_recipe(
        &self,
        meal_name: &str,
    ) -> Result<DetailedRecipe, SuggestionError> {
        let parsed = self
            .request_json("recipe detail", &recipe_prompt(meal_name))
            .await?;

        recipe_from_value(&parsed).ok_or(SuggestionError::UnexpectedShape("detailed recipe"))
    }

    /// Looks up one tutorial video id for the meal; the id is null
    /// when the model finds nothing suitable.
    pub async fn find_recipe_video(
        &self,
        meal_name: &str,
    ) -> Result<RecipeVideo, SuggestionError> {
        let parsed = self
            .request_json("recipe video lookup", &video_prompt(meal_name))
            .await?;

        match parsed.get("youtubeVideoId") {
            Some(Value::String(id)) => Ok(RecipeVideo {
                youtube_video_id: Some(id.clone()),
            }),
            Some(Value::Null) => Ok(RecipeVideo {
                youtube_video_id: None,
            }),
            _ => Err(SuggestionError::UnexpectedShape("recipe video")),
        }
    }

    /// 3-5 exercises matched to the user's TDEE, activity level and
    /// goal. Same drop-invalid-items policy as meal suggestions.
    pub async fn suggest_exercises(
        &self,
        params: &ExerciseParams,
    ) -> Result<Vec<ExerciseSuggestion>, SuggestionError> {
        let parsed = self
            .request_json("exercise suggestion", &exercise_prompt(params))
            .await?;

        let items = parsed
            .as_array()
            .ok_or(SuggestionError::UnexpectedShape("exercise suggestion list"))?;

        let exercises: Vec<ExerciseSuggestion> =
            items.iter().filter_map(exercise_from_value).collect();
        if exercises.is_empty() && !items.is_empty() {
            log::warn!("All {} exercise items failed shape validation", items.len());
            return Err(SuggestionError::UnexpectedShape("exercise suggestion list"));
        }

        Ok(exercises)
    }
}

fn string_field(item: &Value, key: &str) -> Option<String> {
    item.get(key).and_then(Value::as_str).map(|s| s.to_string())
}

fn meal_from_value(item: &Value) -> Option<MealSuggestion> {
    let meal_name = item.get("mealName").and_then(Value::as_str)?;
    let description = item.get("description").and_then(Value::as_str)?;

    Some(MealSuggestion {
        meal_name: meal_name.to_string(),
        description: description.to_string(),
        estimated_calories: string_field(item, "estimatedCalories"),
        protein_grams: string_field(item, "proteinGrams"),
        carbs_grams: string_field(item, "carbsGrams"),
        fats_grams: string_field(item, "fatsGrams"),
    })
}

fn recipe_from_value(parsed: &Value) -> Option<DetailedRecipe> {
    let meal_name = parsed.get("mealName").and_then(Value::as_str)?;
    let raw_ingredients = parsed.get("ingredients").and_then(Value::as_array)?;
    let raw_steps = parsed.get("preparationSteps").and_then(Value::as_array)?;

    let mut ingredients = Vec::with_capacity(raw_ingredients.len());
    for ingredient in raw_ingredients {
        ingredients.push(Ingredient {
            name: ingredient.get("name").and_then(Value::as_str)?.to_string(),
            quantity: ingredient
                .get("quantity")
                .and_then(Value::as_str)?
                .to_string(),
        });
    }

    let mut preparation_steps = Vec::with_capacity(raw_steps.len());
    for step in raw_steps {
        preparation_steps.push(step.as_str()?.to_string());
    }

    Some(DetailedRecipe {
        meal_name: meal_name.to_string(),
        ingredients,
        preparation_steps,
        youtube_video_id: None,
    })
}

fn exercise_from_value(item: &Value) -> Option<ExerciseSuggestion> {
    let exercise_name = item.get("exerciseName").and_then(Value::as_str)?;
    let description = item.get("description").and_then(Value::as_str)?;

    Some(ExerciseSuggestion {
        exercise_name: exercise_name.to_string(),
        description: description.to_string(),
        duration: string_field(item, "duration"),
        intensity: string_field(item, "intensity"),
        estimated_calories_burned: string_field(item, "estimatedCaloriesBurned"),
        animation_url: normalize_animation_url(item.get("animationUrl")),
    })
}

fn normalize_animation_url(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(|url| url.to_string())
}

fn meal_prompt(ingredients: &str) -> String {
    format!(
        r#"You are a nutrition expert and creative chef. Based on the following ingredients I have available:
"{}"

Suggest 3 healthy, easy-to-prepare meals I could make from them.
Focus on meals that are balanced and nutritious.
For each suggested meal, provide:
1. The meal name (mealName).
2. A short description of how to prepare it (description).
3. A rough calorie estimate (estimatedCalories), for example "about 350 kcal".
4. A rough protein estimate in grams (proteinGrams), for example "about 25 g protein".
5. A rough carbohydrate estimate in grams (carbsGrams), for example "about 45 g carbs".
6. A rough fat estimate in grams (fatsGrams), for example "about 15 g fat".

Respond with a JSON array of objects, one object per meal. Example of the expected format:
[
  {{
    "mealName": "Quinoa salad with vegetables and chicken",
    "description": "Cook the quinoa. Mix it with grilled chicken pieces and chopped vegetables such as tomato, cucumber and pepper. Dress with lemon juice and olive oil.",
    "estimatedCalories": "about 400 kcal",
    "proteinGrams": "about 30 g protein",
    "carbsGrams": "about 40 g carbs",
    "fatsGrams": "about 15 g fat"
  }}
]
Respond ONLY with valid JSON. Do not add any text before or after it."#,
        ingredients
    )
}

fn recipe_prompt(meal_name: &str) -> String {
    format!(
        r#"You are a cooking assistant. Given the following meal name:
"{meal}"

Provide a detailed recipe for this meal. The response must include:
1. The meal name (mealName), identical to the name given above.
2. The ingredient list (ingredients), where each ingredient is an object with:
   * The ingredient name (name).
   * The quantity (quantity), for example "200 g", "1 medium piece", "3 tablespoons".
3. The preparation steps (preparationSteps) as a list of strings, one string per step.

Respond in JSON only. Example of the expected format:
{{
  "mealName": "{meal}",
  "ingredients": [
    {{ "name": "chicken breast", "quantity": "2 pieces (about 400 g)" }},
    {{ "name": "lemon", "quantity": "1 large" }},
    {{ "name": "olive oil", "quantity": "2 tablespoons" }}
  ],
  "preparationSteps": [
    "Preheat the oven to 200 degrees Celsius.",
    "In a small bowl, mix the lemon juice and olive oil.",
    "Season the chicken with the mixture and bake it."
  ]
}}
Respond ONLY with valid JSON. Do not add any text before or after it."#,
        meal = meal_name
    )
}

fn video_prompt(meal_name: &str) -> String {
    format!(
        r#"You are a search assistant specialized in finding recipe videos on YouTube. Given the following meal name:
"{}"

Find a suitable tutorial video for this recipe on YouTube.
Respond in JSON containing the video id (youtubeVideoId). If no suitable video is found, the video id must be null.

Example of the expected format when a video is found:
{{
  "youtubeVideoId": "dQw4w9WgXcQ"
}}

Example of the expected format when no video is found:
{{
  "youtubeVideoId": null
}}
Respond ONLY with valid JSON. Do not add any text before or after it."#,
        meal_name
    )
}

fn exercise_prompt(params: &ExerciseParams) -> String {
    format!(
        r#"You are a fitness coach and exercise expert. Based on the following user data:
- Gender: {gender}
- Age: {age} years
- Estimated Total Daily Energy Expenditure (TDEE): {tdee} kcal/day
- Current general activity level: "{activity}"
- Primary exercise goal: "{goal}"

Suggest 3 to 5 varied, suitable exercises. The suggestions must be realistic and practical.
For each suggested exercise, provide:
1. The exercise name (exerciseName).
2. A short description or basic instructions (description).
3. The suggested duration (duration), for example "30 minutes" or "3 sets x 12 reps".
4. The suggested intensity (intensity), for example "low", "moderate", "high".
5. A rough estimate of the calories burned (estimatedCaloriesBurned) if possible, for example "about 150-250 kcal". (Mention that this is approximate and depends on many factors.)
6. A URL to a publicly accessible animated GIF demonstrating the exercise (animationUrl). The animation must be clear and directly relevant to the exercise. If no suitable GIF can be found, set animationUrl to null. Avoid long videos or anything requiring a subscription.

Respond with a JSON array of objects, one object per exercise. Example of the expected format:
[
  {{
    "exerciseName": "Brisk walking",
    "description": "Walk at a fast, steady pace outdoors or on a treadmill.",
    "duration": "30-45 minutes",
    "intensity": "moderate",
    "estimatedCaloriesBurned": "about 200-300 kcal",
    "animationUrl": "https://example.com/walking.gif"
  }},
  {{
    "exerciseName": "Push-ups",
    "description": "Upper-body exercise for the chest and arms; scale to your fitness level.",
    "duration": "3 sets, as many reps as possible",
    "intensity": "moderate to high",
    "estimatedCaloriesBurned": "about 100-150 kcal per 15 minutes",
    "animationUrl": null
  }}
]
Respond ONLY with valid JSON. Do not add any text before or after it."#,
        gender = params.gender.label(),
        age = params.age,
        tdee = params.tdee.round() as i64,
        activity = params.current_activity_level.label(),
        goal = params.exercise_goal.label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::levels::{ActivityLevel, ExerciseGoal, Gender};
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone)]
    struct MockProvider {
        api_key: String,
        response: Result<String, String>,
        calls: Arc<AtomicUsize>,
    }

    impl MockProvider {
        fn with_response(response: &str) -> Self {
            Self {
                api_key: "test-key".to_string(),
                response: Ok(response.to_string()),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                api_key: "test-key".to_string(),
                response: Err(message.to_string()),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for MockProvider {
        async fn new(api_key: String, _system_message: String) -> Result<Self> {
            Ok(Self {
                api_key,
                response: Ok(String::new()),
                calls: Arc::new(AtomicUsize::new(0)),
            })
        }

        async fn complete(&self, prompt: &str) -> Result<String> {
            self.complete_json(prompt).await
        }

        async fn complete_json(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone().map_err(|e| anyhow!(e))
        }

        async fn get_model_info(&self) -> Result<String> {
            Ok("mock".to_string())
        }

        fn get_system_message(&self) -> String {
            String::new()
        }

        fn get_api_key(&self) -> &String {
            &self.api_key
        }

        fn clone_box(&self) -> Box<dyn CompletionProvider + Send + Sync> {
            Box::new(self.clone())
        }
    }

    fn gateway_with(response: &str) -> (SuggestionGateway, Arc<AtomicUsize>) {
        let mock = MockProvider::with_response(response);
        let calls = mock.calls.clone();
        (SuggestionGateway::new(Box::new(mock)), calls)
    }

    fn exercise_params() -> ExerciseParams {
        ExerciseParams {
            tdee: 2200.0,
            gender: Gender::Male,
            age: 30,
            current_activity_level: ActivityLevel::ModeratelyActive,
            exercise_goal: ExerciseGoal::WeightLoss,
        }
    }

    #[tokio::test]
    async fn test_meals_keep_valid_drop_invalid() {
        let (gateway, _) = gateway_with(
            r#"[
                {"mealName": "Lentil soup", "description": "Simmer lentils with onion and cumin.", "estimatedCalories": "about 300 kcal"},
                {"mealName": "Mystery meal"}
            ]"#,
        );

        let meals = gateway.suggest_meals("lentils, onion").await.unwrap();
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].meal_name, "Lentil soup");
        assert_eq!(meals[0].estimated_calories.as_deref(), Some("about 300 kcal"));
    }

    #[tokio::test]
    async fn test_meals_all_invalid_is_shape_error() {
        let (gateway, _) = gateway_with(r#"[{"mealName": 3}, {"description": "no name"}]"#);

        let err = gateway.suggest_meals("rice").await.unwrap_err();
        assert!(matches!(err, SuggestionError::UnexpectedShape(_)));
    }

    #[tokio::test]
    async fn test_meals_empty_array_is_empty_success() {
        let (gateway, _) = gateway_with("[]");

        let meals = gateway.suggest_meals("rice").await.unwrap();
        assert!(meals.is_empty());
    }

    #[tokio::test]
    async fn test_meals_accept_fenced_response() {
        let (gateway, _) = gateway_with(
            "```json\n[{\"mealName\": \"Omelette\", \"description\": \"Beat eggs, fry.\"}]\n```",
        );

        let meals = gateway.suggest_meals("eggs").await.unwrap();
        assert_eq!(meals.len(), 1);
    }

    #[tokio::test]
    async fn test_meals_non_array_is_shape_error() {
        let (gateway, _) = gateway_with(r#"{"mealName": "One meal", "description": "x"}"#);

        let err = gateway.suggest_meals("eggs").await.unwrap_err();
        assert!(matches!(err, SuggestionError::UnexpectedShape(_)));
    }

    #[tokio::test]
    async fn test_recipe_all_fields_required() {
        let (gateway, _) = gateway_with(
            r#"{
                "mealName": "Lentil soup",
                "ingredients": [
                    {"name": "lentils", "quantity": "200 g"},
                    {"name": "onion", "quantity": "1 medium"}
                ],
                "preparationSteps": ["Rinse the lentils.", "Simmer for 25 minutes."]
            }"#,
        );

        let recipe = gateway.detailed_recipe("Lentil soup").await.unwrap();
        assert_eq!(recipe.meal_name, "Lentil soup");
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.preparation_steps.len(), 2);
        assert!(recipe.youtube_video_id.is_none());
    }

    #[tokio::test]
    async fn test_recipe_rejects_bad_ingredient() {
        // One ingredient missing its quantity sinks the whole response.
        let (gateway, _) = gateway_with(
            r#"{
                "mealName": "Lentil soup",
                "ingredients": [{"name": "lentils"}],
                "preparationSteps": ["Rinse the lentils."]
            }"#,
        );

        let err = gateway.detailed_recipe("Lentil soup").await.unwrap_err();
        assert!(matches!(err, SuggestionError::UnexpectedShape(_)));
    }

    #[tokio::test]
    async fn test_recipe_rejects_non_string_step() {
        let (gateway, _) = gateway_with(
            r#"{
                "mealName": "Lentil soup",
                "ingredients": [{"name": "lentils", "quantity": "200 g"}],
                "preparationSteps": ["Rinse the lentils.", 7]
            }"#,
        );

        let err = gateway.detailed_recipe("Lentil soup").await.unwrap_err();
        assert!(matches!(err, SuggestionError::UnexpectedShape(_)));
    }

    #[tokio::test]
    async fn test_video_null_id_is_success() {
        let (gateway, _) = gateway_with(r#"{"youtubeVideoId": null}"#);

        let video = gateway.find_recipe_video("Lentil soup").await.unwrap();
        assert!(video.youtube_video_id.is_none());
    }

    #[tokio::test]
    async fn test_video_string_id_is_success() {
        let (gateway, _) = gateway_with(r#"{"youtubeVideoId": "dQw4w9WgXcQ"}"#);

        let video = gateway.find_recipe_video("Lentil soup").await.unwrap();
        assert_eq!(video.youtube_video_id.as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[tokio::test]
    async fn test_video_numeric_id_is_shape_error() {
        let (gateway, _) = gateway_with(r#"{"youtubeVideoId": 42}"#);

        let err = gateway.find_recipe_video("Lentil soup").await.unwrap_err();
        assert!(matches!(err, SuggestionError::UnexpectedShape(_)));
    }

    #[tokio::test]
    async fn test_exercises_normalize_animation_url() {
        let (gateway, _) = gateway_with(
            r#"[
                {"exerciseName": "Brisk walking", "description": "Walk fast.", "animationUrl": "  "},
                {"exerciseName": "Push-ups", "description": "Chest down, push up.", "animationUrl": " https://x/y.gif "},
                {"exerciseName": "Squats", "description": "Sit back and stand.", "animationUrl": null}
            ]"#,
        );

        let exercises = gateway.suggest_exercises(&exercise_params()).await.unwrap();
        assert_eq!(exercises.len(), 3);
        assert!(exercises[0].animation_url.is_none());
        assert_eq!(exercises[1].animation_url.as_deref(), Some("https://x/y.gif"));
        assert!(exercises[2].animation_url.is_none());
    }

    #[tokio::test]
    async fn test_exercises_drop_invalid_items() {
        let (gateway, _) = gateway_with(
            r#"[
                {"exerciseName": "Brisk walking", "description": "Walk fast."},
                {"exerciseName": "No description here"}
            ]"#,
        );

        let exercises = gateway.suggest_exercises(&exercise_params()).await.unwrap();
        assert_eq!(exercises.len(), 1);
        assert_eq!(exercises[0].exercise_name, "Brisk walking");
    }

    #[tokio::test]
    async fn test_unavailable_gateway_fails_every_operation_without_calls() {
        let gateway = SuggestionGateway::unavailable();

        assert!(matches!(
            gateway.suggest_meals("rice").await.unwrap_err(),
            SuggestionError::ServiceUnavailable
        ));
        assert!(matches!(
            gateway.detailed_recipe("Lentil soup").await.unwrap_err(),
            SuggestionError::ServiceUnavailable
        ));
        assert!(matches!(
            gateway.find_recipe_video("Lentil soup").await.unwrap_err(),
            SuggestionError::ServiceUnavailable
        ));
        assert!(matches!(
            gateway.suggest_exercises(&exercise_params()).await.unwrap_err(),
            SuggestionError::ServiceUnavailable
        ));
    }

    #[tokio::test]
    async fn test_transport_error_names_the_operation() {
        let mock = MockProvider::failing("connection reset");
        let calls = mock.calls.clone();
        let gateway = SuggestionGateway::new(Box::new(mock));

        let err = gateway.suggest_meals("rice").await.unwrap_err();
        match err {
            SuggestionError::Transport { operation, message } => {
                assert_eq!(operation, "meal suggestion");
                assert!(message.contains("connection reset"));
            }
            other => panic!("Expected transport error, got {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_non_json_response_is_malformed() {
        let (gateway, calls) = gateway_with("I'm sorry, I can't do that.");

        let err = gateway.suggest_meals("rice").await.unwrap_err();
        assert!(matches!(err, SuggestionError::MalformedResponse(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_prompt_embeds_display_labels() {
        let prompt = exercise_prompt(&exercise_params());
        assert!(prompt.contains("male"));
        assert!(prompt.contains("Moderately active (moderate exercise/sports 3-5 days/week)"));
        assert!(prompt.contains("weight loss"));
        assert!(prompt.contains("2200 kcal/day"));
    }
}
