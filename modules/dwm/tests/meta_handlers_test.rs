use std::sync::Arc;

use serde_json::{json, Value};

use blackpearl_registry::{
    Application, Parameter, RegistryBuilder, TestSet, TypeSpec, WebModule,
};
use dwm::api::dto::{ApplicationDto, SignatureDto, TestRunDto};
use dwm::DwmService;

/// Two applications, registered out of name order, with a parameter-rich
/// handler and two test sets on the booking URL.
fn deploy() -> DwmService {
    let reservation = Application::new("reservation", "Seat reservation webapp")
        .with_webmodule(
            WebModule::new("/reservation/book", "Book a seat")
                .with_parameter(Parameter::new("session"))
                .with_parameter(Parameter::new("date").with_spec(TypeSpec::named("str")))
                .with_parameter(
                    Parameter::new("seat_kind")
                        .with_spec(TypeSpec::Options(vec![json!("window"), json!("aisle")])),
                )
                .with_parameter(
                    Parameter::new("passenger")
                        .with_spec(TypeSpec::Format(json!({"name": "str", "age": "int"}))),
                ),
        )
        .with_webmodule(WebModule::new("/reservation/cancel", "Cancel a booking"))
        .with_testset(
            "/reservation/book",
            TestSet::new("booking_roundtrip", "Book and release a seat", || {
                Ok(json!({"booked": true}))
            }),
        )
        .with_testset(
            "/reservation/book",
            TestSet::new("seat_map", "Seat map stays consistent", || Ok(json!(42))),
        )
        .with_preprocessor("session_check")
        .with_preprocessor("access_check")
        .with_posthandler("data_formatting")
        .with_posthandler("audit_log")
        .with_handler("reservation.handlers")
        .with_handler("reservation.admin_handlers");

    let admin = Application::new("admin", "Operations console")
        .with_webmodule(WebModule::new("/admin/stats", "Server statistics"));

    let mut builder = RegistryBuilder::default();
    builder.register(reservation);
    builder.register(admin);
    DwmService::new(Arc::new(builder.build().unwrap()))
}

/// One URL whose test sets succeed, fail and succeed again, in that order.
fn deploy_flaky() -> DwmService {
    let app = Application::new("flaky", "Failure handling fixture")
        .with_webmodule(WebModule::new("/flaky/ping", "Ping the backend"))
        .with_testset(
            "/flaky/ping",
            TestSet::new("first_ok", "Succeeds", || Ok(json!("pong"))),
        )
        .with_testset(
            "/flaky/ping",
            TestSet::new("blows_up", "Fails", || {
                Err(anyhow::anyhow!("backend unreachable"))
            }),
        )
        .with_testset(
            "/flaky/ping",
            TestSet::new("last_ok", "Succeeds", || Ok(json!(1))),
        );

    let mut builder = RegistryBuilder::default();
    builder.register(app);
    DwmService::new(Arc::new(builder.build().unwrap()))
}

#[test]
fn applications_sorted_by_name_with_sorted_members() {
    let apps = deploy().applications();

    let names: Vec<&str> = apps.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["admin", "reservation"]);

    let reservation = &apps[1];
    assert_eq!(reservation.description, "Seat reservation webapp");
    assert_eq!(
        reservation.modules,
        vec!["/reservation/book", "/reservation/cancel"]
    );
    assert_eq!(
        reservation.preprocessors,
        vec!["access_check", "session_check"]
    );
    assert_eq!(
        reservation.posthandlers,
        vec!["audit_log", "data_formatting"]
    );
    // handlers keep source order, unsorted
    assert_eq!(
        reservation.handlers,
        vec!["reservation.handlers", "reservation.admin_handlers"]
    );
}

#[test]
fn applications_on_empty_registry_is_empty() {
    let service = DwmService::new(Arc::new(RegistryBuilder::default().build().unwrap()));
    assert!(service.applications().is_empty());
}

#[test]
fn signature_describes_parameters_in_declaration_order() {
    let info = deploy().signature("/reservation/book").unwrap();

    assert_eq!(info.desc, "Book a seat");
    let args: Vec<&str> = info.signature.iter().map(|p| p.arg.as_str()).collect();
    assert_eq!(args, vec!["session", "date", "seat_kind", "passenger"]);

    assert_eq!(info.signature[0].type_name, None);
    assert_eq!(info.signature[0].type_def, None);

    assert_eq!(info.signature[1].type_name.as_deref(), Some("str"));
    assert_eq!(info.signature[1].type_def, None);

    assert_eq!(info.signature[2].type_def, Some(json!(["window", "aisle"])));
    assert_eq!(
        info.signature[3].type_def,
        Some(json!({"name": "str", "age": "int"}))
    );

    let testsets: Vec<&str> = info.testsets.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(testsets, vec!["booking_roundtrip", "seat_map"]);
}

#[test]
fn signature_for_unknown_url_is_not_found() {
    let err = deploy().signature("/nope").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "The URL </nope> not found");
}

#[test]
fn signature_without_testsets_yields_empty_list() {
    let info = deploy().signature("/reservation/cancel").unwrap();
    assert!(info.testsets.is_empty());
}

#[test]
fn testsets_lists_names_and_descriptions() {
    let sets = deploy().testsets("/reservation/book").unwrap();
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0].name, "booking_roundtrip");
    assert_eq!(sets[0].desc, "Book and release a seat");
    assert_eq!(sets[1].name, "seat_map");
}

#[test]
fn testsets_for_unknown_url_is_not_found() {
    let err = deploy().testsets("/nope").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "The URL </nope> not found");
}

#[test]
fn testsets_without_registration_is_not_found() {
    let err = deploy().testsets("/reservation/cancel").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        "No testsets found for url </reservation/cancel>"
    );
}

#[test]
fn run_testset_returns_the_function_payload() {
    let data = deploy().run_testset("/reservation/book", "seat_map").unwrap();
    assert_eq!(data, json!(42));
}

#[test]
fn run_testset_for_unknown_url_is_not_found() {
    let err = deploy().run_testset("/nope", "seat_map").unwrap_err();
    assert_eq!(err.to_string(), "The URL </nope> not found");
}

#[test]
fn run_testset_for_unknown_name_is_not_found() {
    let err = deploy()
        .run_testset("/reservation/book", "missing")
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "The name <missing> not found");
}

#[test]
fn run_testset_first_match_wins_on_duplicate_names() {
    let app = Application::new("dupes", "Duplicate test names")
        .with_webmodule(WebModule::new("/dupes/check", "Check"))
        .with_testset("/dupes/check", TestSet::new("check", "First", || Ok(json!(1))))
        .with_testset("/dupes/check", TestSet::new("check", "Second", || Ok(json!(2))));

    let mut builder = RegistryBuilder::default();
    builder.register(app);
    let service = DwmService::new(Arc::new(builder.build().unwrap()));

    assert_eq!(service.run_testset("/dupes/check", "check").unwrap(), json!(1));
}

#[test]
fn run_testset_propagates_test_function_failure() {
    let err = deploy_flaky()
        .run_testset("/flaky/ping", "blows_up")
        .unwrap_err();
    assert!(!err.is_not_found());
    assert_eq!(err.to_string(), "backend unreachable");
}

#[test]
fn run_all_returns_results_in_registration_order() {
    let runs = deploy().run_all_testsets("/reservation/book").unwrap();

    let dtos: Vec<Value> = runs
        .into_iter()
        .map(|run| serde_json::to_value(TestRunDto::from(run)).unwrap())
        .collect();
    assert_eq!(
        dtos,
        vec![
            json!({"TestSet": "booking_roundtrip", "data": {"booked": true}}),
            json!({"TestSet": "seat_map", "data": 42}),
        ]
    );
}

#[test]
fn run_all_records_failures_and_keeps_running() {
    let runs = deploy_flaky().run_all_testsets("/flaky/ping").unwrap();

    assert_eq!(runs.len(), 3);
    assert!(runs[0].outcome.is_ok());
    assert!(runs[1].outcome.is_err());
    assert_eq!(runs[2].outcome.as_ref().unwrap(), &json!(1));

    let failed = serde_json::to_value(TestRunDto::from(runs.into_iter().nth(1).unwrap())).unwrap();
    assert_eq!(
        failed,
        json!({"TestSet": "blows_up", "error": "backend unreachable"})
    );
}

#[test]
fn run_all_without_testsets_is_not_found() {
    let err = deploy()
        .run_all_testsets("/reservation/cancel")
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        "No testsets found for url </reservation/cancel>"
    );
}

#[test]
fn run_all_for_unknown_url_is_not_found() {
    let err = deploy().run_all_testsets("/nope").unwrap_err();
    assert_eq!(err.to_string(), "The URL </nope> not found");
}

#[test]
fn signature_dto_serializes_absent_annotations_as_null() {
    let dto = SignatureDto::from(deploy().signature("/reservation/book").unwrap());
    let value = serde_json::to_value(&dto).unwrap();

    assert_eq!(
        value["signature"][0],
        json!({"arg": "session", "type": null, "type_def": null})
    );
    assert_eq!(value["desc"], json!("Book a seat"));
    assert_eq!(
        value["testsets"][0],
        json!({"name": "booking_roundtrip", "desc": "Book and release a seat"})
    );
}

#[test]
fn application_dto_keeps_the_wire_field_names() {
    let dtos: Vec<ApplicationDto> = deploy()
        .applications()
        .into_iter()
        .map(Into::into)
        .collect();
    let value = serde_json::to_value(&dtos).unwrap();

    assert_eq!(value[0]["name"], json!("admin"));
    assert_eq!(
        value[1]["modules"],
        json!(["/reservation/book", "/reservation/cancel"])
    );
    assert_eq!(value[1]["description"], json!("Seat reservation webapp"));
}

#[test]
fn meta_endpoint_paths_are_fixed() {
    assert_eq!(dwm::api::APPLICATIONS_PATH, "/applications");
    assert_eq!(dwm::api::SIGNATURE_PATH, "/signature");
    assert_eq!(dwm::api::TESTSETS_PATH, "/testing/testsets");
    assert_eq!(dwm::api::RUN_TESTSET_PATH, "/testing/run");
    assert_eq!(dwm::api::RUN_ALL_TESTSETS_PATH, "/testing/run_all");
}
