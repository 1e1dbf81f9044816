use super::*;

#[test]
fn autocomplete_predictions_become_suggestions() {
    let body = r#"{
        "status": "OK",
        "predictions": [
            { "place_id": "abc", "description": "Rua Augusta, São Paulo - SP, Brasil" },
            { "place_id": "def", "description": "Rua Augusta, Jundiaí - SP, Brasil" }
        ]
    }"#;
    let suggestions = parse_autocomplete(body).unwrap();
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].place_id, "abc");
}

#[test]
fn autocomplete_zero_results_is_empty() {
    let body = r#"{ "status": "ZERO_RESULTS", "predictions": [] }"#;
    assert!(parse_autocomplete(body).unwrap().is_empty());
}

#[test]
fn autocomplete_denied_is_error() {
    let body = r#"{ "status": "REQUEST_DENIED", "error_message": "bad key" }"#;
    let err = parse_autocomplete(body).unwrap_err();
    assert!(matches!(err, LookupError::Decode(msg) if msg.contains("bad key")));
}

#[test]
fn place_details_prefers_level_two_for_city() {
    let body = r#"{
        "status": "OK",
        "result": {
            "formatted_address": "Av. Paulista, 1000 - Bela Vista, São Paulo - SP, Brasil",
            "address_components": [
                { "long_name": "Bela Vista", "types": ["sublocality"] },
                { "long_name": "São Paulo", "types": ["locality", "political"] },
                { "long_name": "São Paulo Metro", "types": ["administrative_area_level_2"] },
                { "long_name": "São Paulo", "types": ["administrative_area_level_1"] }
            ],
            "geometry": { "location": { "lat": -23.56, "lng": -46.65 } }
        }
    }"#;
    let address = parse_place_details(body).unwrap();
    assert_eq!(address.city, "São Paulo Metro");
    assert_eq!(address.state, "São Paulo");
    assert_eq!(
        address.coordinates,
        Some(Coordinates { latitude: -23.56, longitude: -46.65 })
    );
}

#[test]
fn place_details_falls_back_to_locality() {
    let body = r#"{
        "status": "OK",
        "result": {
            "formatted_address": "Rua X, Campinas",
            "address_components": [
                { "long_name": "Campinas", "types": ["locality"] }
            ]
        }
    }"#;
    let address = parse_place_details(body).unwrap();
    assert_eq!(address.city, "Campinas");
    assert_eq!(address.state, "");
    assert!(address.coordinates.is_none());
}

#[test]
fn distance_matrix_reads_first_element() {
    let body = r#"{
        "status": "OK",
        "rows": [ { "elements": [ { "status": "OK", "distance": { "value": 15300, "text": "15,3 km" } } ] } ]
    }"#;
    assert_eq!(parse_distance_matrix(body).unwrap(), 15_300);
}

#[test]
fn distance_matrix_without_route_is_no_result() {
    let body = r#"{
        "status": "OK",
        "rows": [ { "elements": [ { "status": "ZERO_RESULTS" } ] } ]
    }"#;
    assert!(matches!(parse_distance_matrix(body), Err(LookupError::NoResult)));
}
