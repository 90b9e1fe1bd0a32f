use cropwise_core::fertilizer::NutrientAdvice;
use cropwise_core::model::WeatherReport;
use cropwise_core::scoring::{Evaluation, MAX_SCORE};

pub fn print_evaluation(evaluation: &Evaluation, weather: Option<&WeatherReport>, verbose: bool) {
    let result = &evaluation.result;

    if let Some(report) = weather {
        print_weather(report);
    }

    println!("=== Recommendation ===\n");
    println!(
        "  Crop: {} (confidence {:.0}%)",
        result.crop,
        result.confidence * 100.0
    );
    if !result.alternative_crops.is_empty() {
        println!("  Alternatives: {}", result.alternative_crops.join(", "));
    }
    println!();

    if verbose {
        println!("=== Ranking ===\n");
        let max_name = evaluation
            .ranking
            .iter()
            .map(|s| s.crop.len())
            .max()
            .unwrap_or(10);

        for score in &evaluation.ranking {
            println!(
                "  {:<width$}  {}/{}",
                score.crop,
                score.score,
                MAX_SCORE,
                width = max_name
            );
            for c in &score.criteria {
                let marker = if c.matched { "ok" } else { "--" };
                println!(
                    "    [{}] {:<12} {} {}  (range {})",
                    marker,
                    c.axis.to_string(),
                    c.value,
                    c.axis.unit(),
                    c.range
                );
            }
        }
        println!();
    } else if let Some(winner) = evaluation.ranking.first() {
        let unmet: Vec<String> = winner.unmet().map(|c| c.axis.to_string()).collect();
        if !unmet.is_empty() {
            println!("  Outside {}'s range: {}\n", winner.crop, unmet.join(", "));
        }
    }

    print_advice(&result.fertilizer);
}

pub fn print_advice(advice: &[NutrientAdvice]) {
    println!("=== Fertilizer ===\n");
    for a in advice {
        println!(
            "  {:<11} {:<13} [{}]",
            a.nutrient.to_string(),
            a.status.to_string(),
            a.severity
        );
        println!("    {}", a.recommendation);
    }
    println!();
}

pub fn print_weather(report: &WeatherReport) {
    println!("=== Weather ===\n");
    if !report.location.is_empty() {
        println!("  Location:    {}", report.location);
    }
    println!("  Temperature: {} °C", report.temperature);
    println!("  Humidity:    {} %", report.humidity);
    println!("  Conditions:  {}", report.description);
    println!();
}
