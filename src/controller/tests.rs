use super::resolver::{alias_path, derive_action, short_type_name};
use super::*;
use crate::error::RouterError;
use http::Method;

#[test]
fn test_short_type_name_strips_path_and_generics() {
    assert_eq!(short_type_name("app::web::UserController"), "UserController");
    assert_eq!(
        short_type_name("app::PagedController<alloc::string::String>"),
        "PagedController"
    );
    assert_eq!(short_type_name("UserController"), "UserController");
}

#[test]
fn test_verify_controller_accepts_named_struct() {
    assert_eq!(
        verify_controller("app::UserController").unwrap(),
        "UserController"
    );
    // the substring may appear anywhere in the name
    assert_eq!(
        verify_controller("app::ControllerForUsers").unwrap(),
        "ControllerForUsers"
    );
}

#[test]
fn test_verify_controller_shape_errors() {
    for (name, kind) in [
        ("&app::UserController", "reference"),
        ("*const app::UserController", "raw pointer"),
        ("(app::UserController, u8)", "tuple"),
        ("[app::UserController]", "slice"),
        ("[app::UserController; 2]", "array"),
        ("fn(u8) -> app::UserController", "function pointer"),
        ("dyn app::Controller", "trait object"),
        ("u32", "primitive"),
    ] {
        match verify_controller(name) {
            Err(RouterError::Shape { kind: found, .. }) => assert_eq!(found, kind, "{name}"),
            other => panic!("expected shape error for {name}, got {other:?}"),
        }
    }
}

#[test]
fn test_verify_controller_naming_error() {
    let err = verify_controller("app::UserHandler").unwrap_err();
    assert_eq!(
        err,
        RouterError::Naming {
            type_name: "app::UserHandler".to_string()
        }
    );
    // generics do not count towards the name
    assert!(verify_controller("app::Wrapper<app::UserController>").is_err());
}

#[test]
fn test_controller_path() {
    assert_eq!(controller_path("UserController"), "user");
    assert_eq!(controller_path("AdminUserController"), "adminuser");
    assert_eq!(controller_path("ControllerForUsers"), "forusers");
}

#[test]
fn test_derive_action_defaults_to_get() {
    let (methods, name) = derive_action("ShowAction");
    assert_eq!(methods.as_slice(), &[Method::GET]);
    assert_eq!(name, "show");
}

#[test]
fn test_derive_action_verb_prefix() {
    let (methods, name) = derive_action("Post_CreateAction");
    assert_eq!(methods.as_slice(), &[Method::POST]);
    assert_eq!(name, "create");

    let (methods, name) = derive_action("DELETE_Remove");
    assert_eq!(methods.as_slice(), &[Method::DELETE]);
    assert_eq!(name, "remove");
}

#[test]
fn test_derive_action_unknown_prefix_falls_back_to_get() {
    let (methods, name) = derive_action("Fetch_ListAction");
    assert_eq!(methods.as_slice(), &[Method::GET]);
    assert_eq!(name, "list");
}

#[test]
fn test_derive_action_prefix_matches_by_containment() {
    let (methods, name) = derive_action("GetOrPost_SaveAction");
    assert_eq!(methods.as_slice(), &[Method::GET, Method::POST]);
    assert_eq!(name, "save");

    // "output" contains "put"
    let (methods, _) = derive_action("Output_Report");
    assert_eq!(methods.as_slice(), &[Method::PUT]);
}

#[test]
fn test_derive_action_only_second_segment_is_used() {
    let (methods, name) = derive_action("Put_Update_Extra");
    assert_eq!(methods.as_slice(), &[Method::PUT]);
    assert_eq!(name, "update");
}

#[test]
fn test_derive_action_removes_action_anywhere() {
    let (_, name) = derive_action("TransactionAction");
    assert_eq!(name, "trans");
}

#[test]
fn test_alias_path() {
    assert_eq!(alias_path("user/index").as_deref(), Some("user"));
    assert_eq!(alias_path("index/index").as_deref(), Some(""));
    assert_eq!(
        alias_path("user/address/index").as_deref(),
        Some("user/address")
    );
    assert_eq!(alias_path("user/show"), None);
}

#[test]
fn test_alias_path_removes_index_anywhere() {
    // "reindex" loses its "index" as well
    assert_eq!(alias_path("search/reindex").as_deref(), Some("search/re"));
}

#[test]
fn test_param_classification() {
    assert_eq!(Param::of::<crate::server::Request>(), Param::Request);
    assert_eq!(Param::of::<crate::server::Response>(), Param::Response);
    assert_eq!(
        Param::of::<crate::ids::RequestId>(),
        Param::Inject(TypeToken::of::<crate::ids::RequestId>())
    );
}

#[test]
fn test_returns_typed_access() {
    let returns = Returns::one(7_u32).and("seven");
    assert_eq!(returns.len(), 2);
    assert_eq!(returns.get::<u32>(0), Some(&7));
    assert_eq!(returns.get::<&str>(1), Some(&"seven"));
    assert_eq!(returns.get::<String>(1), None);
    assert_eq!(returns.get::<u32>(2), None);
}
