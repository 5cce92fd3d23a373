//! Sign-in against a running employee actor.

use kardex::access::{AuthError, Authenticator, RoutePolicy};
use kardex::clients::EmployeeClient;
use kardex::employee_actor::{self, EmployeeError};
use kardex::model::{EmployeeUpdate, NewEmployee, Role};
use resource_actor::ActorClient;
use rust_decimal_macros::dec;

fn start() -> (EmployeeClient, Authenticator) {
    let (actor, client) = employee_actor::new(10);
    tokio::spawn(actor.run(()));
    let employees = EmployeeClient::with_cost(client, 4);
    let authenticator = Authenticator::new(employees.clone());
    (employees, authenticator)
}

fn seller(username: &str, password: &str) -> NewEmployee {
    NewEmployee {
        name: "Ana Costa".into(),
        username: username.into(),
        password: password.into(),
        role: Role::Seller,
        commission_rate: dec!(0.05),
    }
}

#[tokio::test]
async fn test_sign_in_with_correct_password() {
    let (employees, auth) = start();
    let id = employees.register(seller("Ana", "s3nha")).await.unwrap();

    let session = auth.authenticate("ana", "s3nha").await.unwrap();
    assert_eq!(session.employee_id, id);
    assert_eq!(session.role, Role::Seller);
    assert_eq!(session.username, "ana");

    let stored = employees.get(id).await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "s3nha");
    assert!(!format!("{stored:?}").contains(&stored.password_hash));

    let routes = RoutePolicy::default();
    assert!(routes.authorize(&session, "/pedidos").is_ok());
    assert!(routes.authorize(&session, "/estoque").is_err());
}

#[tokio::test]
async fn test_rejections_look_the_same() {
    let (employees, auth) = start();
    let id = employees.register(seller("bruno", "certa")).await.unwrap();

    assert_eq!(
        auth.authenticate("bruno", "errada").await.unwrap_err(),
        AuthError::InvalidCredentials
    );
    assert_eq!(
        auth.authenticate("ninguem", "certa").await.unwrap_err(),
        AuthError::InvalidCredentials
    );

    employees
        .update_employee(
            id,
            EmployeeUpdate {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(
        auth.authenticate("bruno", "certa").await.unwrap_err(),
        AuthError::InvalidCredentials
    );
}

#[tokio::test]
async fn test_usernames_are_unique_ignoring_case() {
    let (employees, _auth) = start();
    employees.register(seller("carla", "a")).await.unwrap();

    let err = employees.register(seller("CARLA", "b")).await.unwrap_err();
    assert_eq!(err, EmployeeError::DuplicateUsername("carla".into()));

    let err = employees.register(seller("carla dias", "b")).await.unwrap_err();
    assert!(matches!(err, EmployeeError::Validation(_)));
}

#[tokio::test]
async fn test_changed_password_replaces_old_one() {
    let (employees, auth) = start();
    let id = employees.register(seller("davi", "antiga")).await.unwrap();

    employees
        .change_password(id, "nova".into())
        .await
        .unwrap();

    assert!(auth.authenticate("davi", "antiga").await.is_err());
    assert!(auth.authenticate("davi", "nova").await.is_ok());
    assert!(matches!(
        employees.change_password(kardex::model::EmployeeId(99), "x".into()).await,
        Err(EmployeeError::NotFound(_))
    ));
}
