use rxscan_config::Config;
use rxscan_core::CandidateExtractor;

/// Strategy for displaying the active extraction rules and exclusions.
#[derive(Debug, Clone, Copy)]
pub struct RulesStrategy;

impl super::CommandStrategy for RulesStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let extractor = CandidateExtractor::new(&config.extraction)?;

        println!("=== rxscan Extraction Rules ===\n");

        for (i, rule) in extractor.rules().iter().enumerate() {
            println!("{}. {} ({})", i + 1, rule.name, rule.id);
            println!("   Pattern: {}", rule.regex.as_str());
            println!("   Cleanup: {}", rule.cleanup.as_str());
        }
        println!();

        println!("Excluded Words:");
        println!("  {}", extractor.exclusions().sorted().join(", "));
        println!();

        println!("Limits:");
        println!("  Max Candidates: {}", config.extraction.max_candidates);
        println!(
            "  Length: more than {} and fewer than {} characters",
            config.extraction.min_length, config.extraction.max_length
        );
        println!();

        println!("Scanner:");
        println!("  Max Image Bytes: {}", config.scanner.max_image_bytes);
        println!("  Marketplace: {}", config.scanner.marketplace_base_url);
        println!("  OCR: {} (lang={})", config.ocr.binary, config.ocr.language);

        Ok(())
    }
}
