use printbeat::domain::charge::ChargeRequest;
use printbeat::domain::money::Money;
use printbeat::domain::ports::{ChargeGatewayBox, CheckoutViewBox, NullView, ViewEvent};
use printbeat::infrastructure::in_memory::InMemoryChargeGateway;

#[tokio::test]
async fn test_gateway_as_trait_object() {
    let handle = InMemoryChargeGateway::new();
    let gateway: ChargeGatewayBox = Box::new(handle.clone());
    let request = ChargeRequest::new(Money::from_minor(4649), "cus_1");
    let expected = request.clone();

    // Verify Send + Sync by spawning tasks
    let receipt = tokio::spawn(async move { gateway.make_charge(&request).await.unwrap() })
        .await
        .unwrap();

    assert_eq!(receipt.amount, Money::from_minor(4649));
    assert_eq!(handle.requests().await, vec![expected]);
}

#[tokio::test]
async fn test_view_as_trait_object() {
    let view: CheckoutViewBox = Box::new(NullView);
    tokio::spawn(async move { view.notify(ViewEvent::ReloadItems) })
        .await
        .unwrap();
}
