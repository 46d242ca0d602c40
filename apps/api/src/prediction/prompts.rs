// Prompt construction for the property prediction flow.
// Pure string building: no lookups, no validation, no I/O.

/// Year anchors the model is asked to estimate, in output order.
pub const PREDICTION_YEARS: [u16; 3] = [2025, 2030, 2040];

/// Header line of the pipe-delimited reply schema.
pub const PREDICTION_SCHEMA: &str =
    "year|purchase_income|rental_income|price_range_low|price_range_high|percentage_change";

/// Worked example embedded in the prompt to anchor the model's output format.
/// One line per entry of `PREDICTION_YEARS`.
const PREDICTION_EXAMPLE: &str = "\
2025|$120,000|$75,000|$800,000|$950,000|58%
2030|$135,000|$82,000|$950,000|$1,100,000|40%
2040|$150,000|$90,000|$1,100,000|$1,300,000|37%";

/// Builds the structured-prediction prompt.
///
/// `base_income` is the 2016 census median for the suburb, or 0 when the
/// suburb is missing from the income table. Empty strings pass through as-is.
pub fn build_prediction_prompt(
    state: &str,
    suburb: &str,
    property_type: &str,
    bedrooms: u32,
    bathrooms: u32,
    base_income: u32,
) -> String {
    format!(
        "Given 2016 census data showing a median income of {base_income} in {suburb}, {state},\n\
         estimate for {years} requirements for:\n\
         - {property_type} with {bedrooms} bedrooms and {bathrooms} bathrooms\n\
         \n\
         Provide numerical answers only in this exact format:\n\
         {PREDICTION_SCHEMA}\n\
         Example:\n\
         {PREDICTION_EXAMPLE}",
        years = year_list(),
    )
}

/// "2025, 2030, and 2040"
fn year_list() -> String {
    let years: Vec<String> = PREDICTION_YEARS.iter().map(u16::to_string).collect();
    match years.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{}, and {last}", rest.join(", ")),
        Some((last, _)) => last.clone(),
        None => String::new(),
    }
}
