use std::cell::RefCell;
use std::collections::HashMap;

use digikey_core::{
    CatalogClient, CatalogConfig, CoreError, Endpoint, Filters, KeywordSearchRequest,
    ParametricFilter, PartDetailRequest, PartDetailStyle, SearchOption, Sort, SortDirection,
    SortOption, Transport, TransportError, ViolationKind,
};
use serde_json::{json, Value};

/// Replays canned responses per endpoint and records every query it is sent.
#[derive(Default)]
struct RecordingTransport {
    responses: HashMap<Endpoint, Result<Value, TransportError>>,
    sent: RefCell<Vec<(Endpoint, Value)>>,
}

impl RecordingTransport {
    fn replying(mut self, endpoint: Endpoint, response: Value) -> Self {
        self.responses.insert(endpoint, Ok(response));
        self
    }

    fn failing(mut self, endpoint: Endpoint, error: TransportError) -> Self {
        self.responses.insert(endpoint, Err(error));
        self
    }

    fn sent(&self) -> Vec<(Endpoint, Value)> {
        self.sent.borrow().clone()
    }
}

impl Transport for RecordingTransport {
    fn fetch(&self, endpoint: Endpoint, query: &Value) -> Result<Value, TransportError> {
        self.sent.borrow_mut().push((endpoint, query.clone()));
        self.responses.get(&endpoint).cloned().unwrap_or_else(|| {
            Err(TransportError::non_retryable(format!(
                "no canned response for {endpoint}"
            )))
        })
    }
}

fn search_response() -> Value {
    json!({
        "ProductsCount": 2,
        "LimitedTaxonomy": {
            "ProductCount": 2,
            "NewProductCount": 0,
            "ParameterId": -8,
            "ValueId": "0",
            "Parameter": "Categories",
            "Value": "All Products",
            "Children": [{
                "ProductCount": 2,
                "NewProductCount": 0,
                "ParameterId": -8,
                "ValueId": "3",
                "Parameter": "Categories",
                "Value": "Capacitors",
                "Children": []
            }]
        },
        "FilterOptions": [{
            "ParameterId": 1989,
            "Parameter": "Supplier",
            "Values": [{ "ValueId": "1", "Value": "Digi-Key Electronics" }]
        }],
        "Products": [
            {
                "ManufacturerPartNumber": "ECA-1VM102",
                "DigiKeyPartNumber": "P5555-ND",
                "PartUrl": "/product-detail/en/P5555-ND",
                "MinimumOrderQuantity": 1
            },
            { "ManufacturerPartNumber": "EEU-FR1V102" }
        ]
    })
}

#[test]
fn search_sends_camel_cased_query_with_defaults() {
    let transport =
        RecordingTransport::default().replying(Endpoint::KeywordSearch, search_response());
    let client = CatalogClient::new(&transport);

    let request = KeywordSearchRequest::new("1000uF 35V")
        .with_search_option(SearchOption::InStock)
        .with_filters(
            Filters::default()
                .with_taxonomy_ids([3])
                .with_parametric_filter(ParametricFilter::new(2085, "2132")),
        )
        .with_sort(Sort::new(SortOption::UnitPrice, SortDirection::Ascending));
    let result = client.search(&request).expect("search must succeed");

    assert_eq!(result.hits(), 2);
    assert_eq!(
        transport.sent(),
        vec![(
            Endpoint::KeywordSearch,
            json!({
                "Keywords": "1000uF 35V",
                "SearchOptions": ["InStock"],
                "RecordCount": 10,
                "RecordStartPos": 0,
                "Filters": {
                    "TaxonomyIds": [3],
                    "ParametricFilters": [{ "ParameterId": 2085, "ValueId": "2132" }]
                },
                "Sort": { "SortOption": "SortByUnitPrice", "Direction": "Ascending" },
                "RequestedQuantity": 1
            })
        )]
    );
}

#[test]
fn search_result_exposes_normalized_branches() {
    let transport =
        RecordingTransport::default().replying(Endpoint::KeywordSearch, search_response());
    let client = CatalogClient::new(&transport);

    let result = client
        .search_raw(&json!({ "keywords": "capacitor", "record_count": 2 }))
        .expect("search must succeed");

    let taxonomy = result.taxonomy();
    assert_eq!(taxonomy.value.as_deref(), Some("All Products"));
    assert_eq!(taxonomy.children[0].value_id.as_deref(), Some("3"));
    assert_eq!(taxonomy.depth(), 2);

    let options = result.filter_options();
    assert_eq!(options[0].to_string(), "{1989 : Supplier}");
    assert_eq!(options[0].values[0].to_string(), "{1 : Digi-Key Electronics}");

    let products = result.products();
    assert_eq!(products.len(), 2);
    assert_eq!(
        products[0].digikey_url(),
        "https://www.digikey.com/product-detail/en/P5555-ND"
    );
    assert_eq!(products[1].moq(), None);
    assert_eq!(transport.sent()[0].1["RecordCount"], json!(2));
}

#[test]
fn rejected_requests_are_never_sent() {
    let transport =
        RecordingTransport::default().replying(Endpoint::KeywordSearch, search_response());
    let client = CatalogClient::new(&transport);

    let err = client
        .search(
            &KeywordSearchRequest::new("resistor")
                .with_record_count(0)
                .with_sort(Sort::new(SortOption::Description, SortDirection::Descending).with_parameter_id(7)),
        )
        .expect_err("must fail");

    let report = err.report().expect("carries a report");
    assert!(report.has("record_count", ViolationKind::Constraint));
    assert!(report.has("sort.sort_parameter_id", ViolationKind::CrossField));

    let err = client
        .search_raw(&json!({ "keywords": "resistor", "page": 2 }))
        .expect_err("must fail");
    assert!(err
        .report()
        .is_some_and(|report| report.has("page", ViolationKind::Conversion)));

    assert!(transport.sent().is_empty());
}

#[test]
fn part_lookup_follows_configured_style() {
    let response = json!({
        "ManufacturerPartNumber": "ECA-1VM102",
        "Manufacturer": { "Value": "Panasonic" }
    });
    let request = PartDetailRequest::new("P5555-ND")
        .include_associated(true)
        .with_includes("DigiKeyPartNumber");

    let post = RecordingTransport::default().replying(Endpoint::PartDetails, response.clone());
    let part = CatalogClient::new(&post)
        .part(&request)
        .expect("lookup must succeed");
    assert_eq!(part.manufacturer(), "Panasonic");
    assert_eq!(
        post.sent(),
        vec![(
            Endpoint::PartDetails,
            json!({ "Part": "P5555-ND", "IncludeAllAssociatedProducts": true })
        )]
    );

    let get = RecordingTransport::default().replying(Endpoint::PartDetails, response);
    let config = CatalogConfig {
        part_detail_style: PartDetailStyle::Get,
        ..CatalogConfig::default()
    };
    CatalogClient::with_config(&get, config)
        .part(&request)
        .expect("lookup must succeed");
    assert_eq!(
        get.sent()[0].1,
        json!({ "Part": "P5555-ND", "Includes": "DigiKeyPartNumber" })
    );
}

#[test]
fn product_urls_follow_configured_site() {
    let config = CatalogConfig::from_lookup(|var| {
        (var == "DIGIKEY_SITE_URL").then(|| String::from("https://www.digikey.de/"))
    })
    .expect("config must load");
    let transport = RecordingTransport::default().replying(Endpoint::KeywordSearch, search_response());
    let client = CatalogClient::with_config(&transport, config);

    let result = client
        .search(&KeywordSearchRequest::new("capacitor"))
        .expect("search must succeed");
    let urls = result
        .products()
        .iter()
        .map(|part| client.product_url(part))
        .collect::<Vec<_>>();

    assert_eq!(
        urls,
        [
            "https://www.digikey.de/product-detail/en/P5555-ND",
            "https://www.digikey.de",
        ]
    );
}

#[test]
fn transport_failures_surface_unchanged() {
    let transport = RecordingTransport::default().failing(
        Endpoint::KeywordSearch,
        TransportError::new("timed out"),
    );
    let client = CatalogClient::new(&transport);

    let err = client
        .search(&KeywordSearchRequest::new("diode"))
        .expect_err("must fail");
    match err {
        CoreError::Transport(error) => {
            assert!(error.retryable());
            assert_eq!(error.message(), "timed out");
            assert_eq!(error.endpoint(), Some(Endpoint::KeywordSearch));
        }
        other => panic!("expected transport error, got {other:?}"),
    }
    assert_eq!(transport.sent().len(), 1);
}

#[test]
fn malformed_responses_name_the_broken_branch() {
    let transport = RecordingTransport::default().replying(
        Endpoint::KeywordSearch,
        json!({
            "LimitedTaxonomy": { "Value": "All" },
            "FilterOptions": [{ "ParameterId": "not a number" }]
        }),
    );
    let err = CatalogClient::new(&transport)
        .search(&KeywordSearchRequest::new("led"))
        .expect_err("must fail");

    match err {
        CoreError::InvalidResponse { branch, report } => {
            assert_eq!(branch, "FilterOptions");
            assert!(report.has("0.parameter_id", ViolationKind::Conversion));
        }
        other => panic!("expected invalid response, got {other:?}"),
    }

    let transport = RecordingTransport::default()
        .replying(Endpoint::KeywordSearch, json!({ "FilterOptions": [] }));
    let err = CatalogClient::new(&transport)
        .search(&KeywordSearchRequest::new("led"))
        .expect_err("must fail");
    assert!(matches!(err, CoreError::MissingBranch("LimitedTaxonomy")));
}
