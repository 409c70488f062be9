use std::fmt::Write as _;

use digikey_core::{CatalogConfig, KeywordSearchResult};

use super::{read_json, CommandResult};
use crate::cli::InspectArgs;
use crate::error::CliError;
use crate::output::Output;

pub fn run(args: &InspectArgs, config: &CatalogConfig) -> Result<CommandResult, CliError> {
    let result = KeywordSearchResult::new(read_json(&args.file)?)?;
    let site_url = args.products.then_some(config.site_url.as_str());
    Ok(CommandResult::ok(Output::Text(render(&result, site_url))))
}

/// Products are listed, with their page on `site_url`, only when a site is given.
fn render(result: &KeywordSearchResult, site_url: Option<&str>) -> String {
    let mut out = result.summary(false);
    if let Some(site_url) = site_url {
        for part in result.products() {
            let _ = write!(out, "\n\t{part} {}", part.url_on(site_url));
        }
    }

    out.push_str("\ntaxonomy:");
    for (depth, taxon) in result.taxonomy().walk() {
        let indent = "  ".repeat(depth + 1);
        let _ = match taxon.product_count {
            Some(count) => write!(out, "\n{indent}{taxon} ({count})"),
            None => write!(out, "\n{indent}{taxon}"),
        };
    }

    if !result.filter_options().is_empty() {
        out.push_str("\nfilters:");
        for option in result.filter_options() {
            let _ = write!(out, "\n  {option} ({} values)", option.values.len());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::commands::test_support::json_file;

    #[test]
    fn renders_summary_tree_and_filters() {
        let file = json_file(&json!({
            "ProductsCount": 2,
            "LimitedTaxonomy": {
                "Value": "All Products",
                "ProductCount": 2,
                "Children": [
                    { "Value": "Capacitors", "ProductCount": 2, "Children": [{ "Value": "Aluminum" }] }
                ]
            },
            "FilterOptions": [{ "ParameterId": 1989, "Parameter": "Supplier", "Values": [{ "ValueId": "1", "Value": "Digi-Key" }] }],
            "Products": [{ "ManufacturerPartNumber": "ECA-1VM102", "PartUrl": "/p/1" }]
        }));

        let result = run(
            &InspectArgs {
                file: file.path().to_path_buf(),
                products: true,
            },
            &CatalogConfig::default(),
        )
        .expect("command must run");

        assert_eq!(
            result.output,
            Output::Text(String::from(
                "<KeywordSearchResult: hits=2>\n\t<Part mpn=ECA-1VM102> https://www.digikey.com/p/1\n\
                 taxonomy:\n  All Products (2)\n    Capacitors (2)\n      Aluminum\n\
                 filters:\n  {1989 : Supplier} (1 values)"
            ))
        );
    }

    #[test]
    fn missing_branch_is_a_data_error() {
        let file = json_file(&json!({ "LimitedTaxonomy": {} }));
        let err = run(
            &InspectArgs {
                file: file.path().to_path_buf(),
                products: false,
            },
            &CatalogConfig::default(),
        )
        .err()
        .expect("must fail");
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "response is missing the 'FilterOptions' branch");
    }

    #[test]
    fn product_urls_use_configured_site() {
        let file = json_file(&json!({
            "ProductsCount": 1,
            "LimitedTaxonomy": { "Value": "All Products" },
            "FilterOptions": [],
            "Products": [{ "ManufacturerPartNumber": "ECA-1VM102", "PartUrl": "/p/1" }]
        }));
        let config = CatalogConfig {
            site_url: String::from("https://www.digikey.de"),
            ..CatalogConfig::default()
        };

        let result = run(
            &InspectArgs {
                file: file.path().to_path_buf(),
                products: true,
            },
            &config,
        )
        .expect("command must run");

        let Output::Text(text) = result.output else {
            panic!("inspect renders text");
        };
        assert!(text.contains("\t<Part mpn=ECA-1VM102> https://www.digikey.de/p/1"));
        assert!(!text.contains("digikey.com"));
    }

    #[test]
    fn deep_taxonomy_is_inspected() {
        let mut taxonomy = json!({ "Value": "level 80" });
        for level in (0..80).rev() {
            taxonomy = json!({ "Value": format!("level {level}"), "Children": [taxonomy] });
        }
        let file = json_file(&json!({
            "LimitedTaxonomy": taxonomy,
            "FilterOptions": []
        }));

        let result = run(
            &InspectArgs {
                file: file.path().to_path_buf(),
                products: false,
            },
            &CatalogConfig::default(),
        )
        .expect("deep tree must be inspected");

        let Output::Text(text) = result.output else {
            panic!("inspect renders text");
        };
        let deepest = format!("\n{}level 80", "  ".repeat(81));
        assert!(text.contains(&deepest));
    }
}
