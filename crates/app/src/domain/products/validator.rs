//! Remote products validator.

use std::time::Duration;

use async_nats::Client;
use async_trait::async_trait;
use mockall::automock;
use orders::products::{Product, ProductCatalog, ProductId};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    domain::products::errors::ProductsValidatorError,
    messaging::{ReplyPacket, RequestPacket},
};

/// Subject the product service answers validation requests on.
///
/// The same JSON document is sent as the request pattern.
pub const VALIDATE_PRODUCTS_SUBJECT: &str = r#"{"cmd":"validate-products"}"#;

fn validate_products_pattern() -> Result<Value, serde_json::Error> {
    serde_json::from_str(VALIDATE_PRODUCTS_SUBJECT)
}

/// Asks the product service to validate identifiers over NATS request/reply.
#[derive(Debug, Clone)]
pub struct NatsProductsValidator {
    client: Client,
    timeout: Duration,
}

impl NatsProductsValidator {
    #[must_use]
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl ProductsValidator for NatsProductsValidator {
    async fn validate(
        &self,
        product_ids: &[ProductId],
    ) -> Result<Vec<Product>, ProductsValidatorError> {
        let pattern = validate_products_pattern().map_err(ProductsValidatorError::Encode)?;
        let packet = RequestPacket::new(pattern, product_ids);

        let payload = serde_json::to_vec(&packet).map_err(ProductsValidatorError::Encode)?;

        debug!(?product_ids, "validating products");

        let message = tokio::time::timeout(
            self.timeout,
            self.client
                .request(VALIDATE_PRODUCTS_SUBJECT, payload.into()),
        )
        .await
        .map_err(|_elapsed| ProductsValidatorError::Timeout(self.timeout))?
        .map_err(|error| ProductsValidatorError::from_request(error, self.timeout))?;

        let products = decode_reply(&message.payload)?;

        ensure_complete(product_ids, products).inspect_err(|error| {
            warn!(%error, "products service reply is incomplete");
        })
    }
}

fn decode_reply(payload: &[u8]) -> Result<Vec<Product>, ProductsValidatorError> {
    let reply: ReplyPacket<Vec<Product>> =
        serde_json::from_slice(payload).map_err(ProductsValidatorError::Decode)?;

    reply
        .into_result()
        .map_err(|error| ProductsValidatorError::Rejected {
            status: error.status,
            message: error.message,
        })
}

/// Fails when any requested identifier is absent from `products`.
fn ensure_complete(
    requested: &[ProductId],
    products: Vec<Product>,
) -> Result<Vec<Product>, ProductsValidatorError> {
    let missing: Vec<ProductId> = {
        let catalog = ProductCatalog::new(&products);

        requested
            .iter()
            .copied()
            .filter(|product_id| !catalog.contains(*product_id))
            .collect()
    };

    if !missing.is_empty() {
        return Err(ProductsValidatorError::MissingProducts(missing));
    }

    Ok(products)
}

#[automock]
#[async_trait]
pub trait ProductsValidator: Send + Sync {
    /// Confirms that every identifier names an existing product.
    ///
    /// Succeeds with the products only when all of them are known.
    async fn validate(
        &self,
        product_ids: &[ProductId],
    ) -> Result<Vec<Product>, ProductsValidatorError>;
}

#[cfg(test)]
mod tests {
    use async_nats::Subscriber;
    use futures::StreamExt;
    use rust_decimal::dec;
    use serde_json::json;
    use testresult::TestResult;
    use tokio::task::JoinHandle;

    use crate::test::nats::start_nats;

    use super::*;

    fn product(id: ProductId) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            price: dec!(1.00),
            available: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn complete_reply_is_accepted() -> TestResult {
        let products = ensure_complete(&[1, 2], vec![product(2), product(1)])?;

        assert_eq!(products.len(), 2);

        Ok(())
    }

    #[test]
    fn missing_ids_fail_the_whole_validation() {
        let result = ensure_complete(&[1, 2, 3], vec![product(2)]);

        assert!(
            matches!(&result, Err(ProductsValidatorError::MissingProducts(ids)) if *ids == vec![1, 3]),
            "expected MissingProducts, got {result:?}"
        );
    }

    #[test]
    fn decode_reply_reads_products() -> TestResult {
        let products = decode_reply(
            br#"{"id":"1","response":[{"id":1,"name":"Keyboard","price":10.5,"available":true}],"isDisposed":true}"#,
        )?;

        assert_eq!(products.first().map(|p| p.price), Some(dec!(10.5)));

        Ok(())
    }

    #[test]
    fn decode_reply_surfaces_remote_rejection() {
        let result = decode_reply(
            br#"{"err":{"status":400,"message":"Some products were not found"},"isDisposed":true}"#,
        );

        assert!(
            matches!(
                &result,
                Err(ProductsValidatorError::Rejected { status: 400, message })
                    if message == "Some products were not found"
            ),
            "expected Rejected, got {result:?}"
        );
    }

    #[test]
    fn decode_reply_rejects_garbage() {
        let result = decode_reply(b"not json");

        assert!(matches!(result, Err(ProductsValidatorError::Decode(_))));
    }

    #[test]
    fn pattern_is_the_subject_document() -> TestResult {
        assert_eq!(validate_products_pattern()?, json!({ "cmd": "validate-products" }));

        Ok(())
    }

    /// Answers the first request on `requests` with `products` and returns
    /// the request that was received.
    fn reply_once(
        client: &Client,
        mut requests: Subscriber,
        products: Vec<Product>,
    ) -> JoinHandle<Option<RequestPacket<Vec<ProductId>>>> {
        let client = client.clone();

        tokio::spawn(async move {
            let message = requests.next().await?;

            let packet: RequestPacket<Vec<ProductId>> =
                serde_json::from_slice(&message.payload).ok()?;

            let reply = serde_json::to_vec(&ReplyPacket::ok(packet.id.clone(), products)).ok()?;

            client.publish(message.reply?, reply.into()).await.ok()?;
            client.flush().await.ok()?;

            Some(packet)
        })
    }

    #[tokio::test]
    async fn validate_sends_ids_to_products_service() -> TestResult {
        let (_nats, client) = start_nats().await;

        let requests = client.subscribe(VALIDATE_PRODUCTS_SUBJECT).await?;
        client.flush().await?;

        let responder = reply_once(&client, requests, vec![product(1), product(2)]);

        let validator = NatsProductsValidator::new(client, Duration::from_secs(5));

        let products = validator.validate(&[1, 2]).await?;

        let request = responder.await?.ok_or("no request received")?;

        assert_eq!(products, vec![product(1), product(2)]);
        assert_eq!(request.pattern, Some(json!({ "cmd": "validate-products" })));
        assert_eq!(request.data, vec![1, 2]);
        assert!(request.id.is_some(), "request should carry a correlation id");

        Ok(())
    }

    #[tokio::test]
    async fn validate_fails_when_reply_omits_a_product() -> TestResult {
        let (_nats, client) = start_nats().await;

        let requests = client.subscribe(VALIDATE_PRODUCTS_SUBJECT).await?;
        client.flush().await?;

        let responder = reply_once(&client, requests, vec![product(1)]);

        let validator = NatsProductsValidator::new(client, Duration::from_secs(5));

        let result = validator.validate(&[1, 2]).await;

        let request = responder.await?.ok_or("no request received")?;

        assert_eq!(request.data, vec![1, 2]);
        assert!(
            matches!(&result, Err(ProductsValidatorError::MissingProducts(ids)) if *ids == vec![2]),
            "expected MissingProducts, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn validate_times_out_when_service_stays_silent() -> TestResult {
        let (_nats, client) = start_nats().await;

        let _requests = client.subscribe(VALIDATE_PRODUCTS_SUBJECT).await?;
        client.flush().await?;

        let timeout = Duration::from_millis(200);
        let validator = NatsProductsValidator::new(client, timeout);

        let result = validator.validate(&[1]).await;

        assert!(
            matches!(&result, Err(ProductsValidatorError::Timeout(elapsed)) if *elapsed == timeout),
            "expected Timeout, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn validate_without_products_service_has_no_responders() {
        let (_nats, client) = start_nats().await;

        let validator = NatsProductsValidator::new(client, Duration::from_secs(5));

        let result = validator.validate(&[1]).await;

        assert!(
            matches!(result, Err(ProductsValidatorError::NoResponders)),
            "expected NoResponders, got {result:?}"
        );
    }
}
