//! Alloy-based delivery over an HTTP JSON-RPC endpoint.
//!
//! The provider carries the operator wallet, so `submit` signs locally and
//! broadcasts the raw transaction.

use crate::{DeliveryError, DeliveryInterface};
use alloy_network::EthereumWallet;
use alloy_primitives::{Address, Bytes, B256};
use alloy_provider::{
	DynProvider, PendingTransactionConfig, PendingTransactionError, Provider, ProviderBuilder,
};
use alloy_rpc_types::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use std::time::Duration;
use toss_types::{Transaction, TransactionHash, TransactionReceipt};

/// Interval between `eth_getTransactionReceipt` polls while waiting.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Alloy-based EVM delivery implementation for a single network.
pub struct AlloyDelivery {
	provider: DynProvider,
	receipt_timeout: Duration,
}

impl AlloyDelivery {
	/// Creates a new AlloyDelivery instance.
	///
	/// # Arguments
	///
	/// * `rpc_url` - HTTP JSON-RPC endpoint
	/// * `signer` - Operator key used to sign submitted transactions
	/// * `receipt_timeout` - How long `wait_for_receipt` waits for a transaction to be mined
	///
	/// # Errors
	///
	/// Returns `DeliveryError::Network` if the URL cannot be parsed.
	pub fn new(
		rpc_url: &str,
		signer: PrivateKeySigner,
		receipt_timeout: Duration,
	) -> Result<Self, DeliveryError> {
		let url = rpc_url
			.trim()
			.parse()
			.map_err(|e| DeliveryError::Network(format!("Invalid RPC URL '{}': {}", rpc_url, e)))?;

		let wallet = EthereumWallet::from(signer);
		let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

		Ok(Self {
			provider: provider.erased(),
			receipt_timeout,
		})
	}

	/// Polls until the node reports a receipt for `hash`.
	async fn poll_receipt(&self, hash: &TransactionHash) -> B256 {
		loop {
			match self.provider.get_transaction_receipt(hash.0).await {
				Ok(Some(receipt)) => return receipt.transaction_hash,
				Ok(None) => {},
				Err(e) => tracing::debug!(tx_hash = %hash, error = %e, "Receipt poll failed"),
			}
			tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
		}
	}

	/// Fetches the receipt of a mined transaction.
	async fn get_receipt(
		&self,
		hash: &TransactionHash,
	) -> Result<TransactionReceipt, DeliveryError> {
		match self.provider.get_transaction_receipt(hash.0).await {
			Ok(Some(receipt)) => Ok(TransactionReceipt {
				hash: TransactionHash(receipt.transaction_hash),
				block_number: receipt.block_number.unwrap_or(0),
				gas_used: receipt.gas_used,
				success: receipt.status(),
			}),
			Ok(None) => Err(DeliveryError::Network(format!(
				"Transaction {} not found",
				hash
			))),
			Err(e) => Err(DeliveryError::Network(format!(
				"Failed to get receipt for {}: {}",
				hash, e
			))),
		}
	}
}

#[async_trait]
impl DeliveryInterface for AlloyDelivery {
	async fn chain_id(&self) -> Result<u64, DeliveryError> {
		self.provider
			.get_chain_id()
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get chain id: {}", e)))
	}

	async fn get_nonce(&self, address: Address) -> Result<u64, DeliveryError> {
		self.provider
			.get_transaction_count(address)
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get nonce: {}", e)))
	}

	async fn eth_call(&self, tx: Transaction) -> Result<Bytes, DeliveryError> {
		let request: TransactionRequest = tx.into();

		self.provider
			.call(request)
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to execute eth_call: {}", e)))
	}

	async fn submit(&self, tx: Transaction) -> Result<TransactionHash, DeliveryError> {
		let chain_id = tx.chain_id;
		let request: TransactionRequest = tx.into();

		tracing::debug!(
			chain_id,
			to = ?request.to,
			nonce = ?request.nonce,
			gas_limit = ?request.gas,
			data_len = request.input.input().map(|d| d.len()).unwrap_or(0),
			"Sending transaction"
		);

		let pending_tx = self.provider.send_transaction(request).await.map_err(|e| {
			tracing::error!(chain_id, error = %e, "Transaction submission failed");
			DeliveryError::Network(format!("Failed to send transaction: {}", e))
		})?;

		let hash = TransactionHash(*pending_tx.tx_hash());
		tracing::info!(tx_hash = %hash, chain_id, "Transaction broadcast");
		Ok(hash)
	}

	async fn wait_for_receipt(
		&self,
		hash: &TransactionHash,
	) -> Result<TransactionReceipt, DeliveryError> {
		let seconds = self.receipt_timeout.as_secs();
		tracing::info!(tx_hash = %hash, timeout_seconds = seconds, "Waiting for receipt");

		let config = PendingTransactionConfig::new(hash.0).with_required_confirmations(1);

		// First of the block watcher and the receipt poll to see the transaction wins.
		let confirm = async {
			let pending_tx = self
				.provider
				.watch_pending_transaction(config)
				.await
				.map_err(|e| match e {
					PendingTransactionError::FailedToRegister => {
						DeliveryError::Network("Failed to register transaction watcher".to_string())
					},
					PendingTransactionError::TransportError(_) => {
						DeliveryError::Network(format!("Transport error: {}", e))
					},
					_ => DeliveryError::Network(format!("Transaction watch failed: {}", e)),
				})?;

			tokio::select! {
				confirmed = pending_tx => confirmed.map_err(|e| {
					DeliveryError::Network(format!("Failed to confirm transaction: {}", e))
				}),
				mined = self.poll_receipt(hash) => Ok(mined),
			}
		};

		let confirmed_hash = tokio::time::timeout(self.receipt_timeout, confirm)
			.await
			.map_err(|_| DeliveryError::ReceiptTimeout {
				hash: *hash,
				seconds,
			})??;

		let receipt = self.get_receipt(&TransactionHash(confirmed_hash)).await?;
		tracing::debug!(
			tx_hash = %receipt.hash,
			block_number = receipt.block_number,
			gas_used = receipt.gas_used,
			success = receipt.success,
			"Receipt received"
		);
		Ok(receipt)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{hex, keccak256};
	use serde_json::{json, Value};
	use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
	use tokio::net::{TcpListener, TcpStream};
	use toss_types::TransactionBuilder;

	const GAME: &str = "0xe7f1725e7734ce288f8367e1bb143e90bb3f0512";

	/// Answers a JSON-RPC request the way a local dev node would.
	fn rpc_result(method: &str, params: &Value, mined: bool) -> Value {
		match method {
			"eth_chainId" => json!("0x7a69"),
			"eth_getTransactionCount" => json!("0x9"),
			"eth_call" => json!(format!("0x{}", "07".repeat(32))),
			"eth_blockNumber" => json!("0x5"),
			"eth_gasPrice" | "eth_maxPriorityFeePerGas" => json!("0x3b9aca00"),
			"eth_estimateGas" => json!("0x5208"),
			"eth_sendRawTransaction" => {
				let raw = params[0].as_str().unwrap_or_default();
				let bytes = hex::decode(raw).unwrap_or_default();
				json!(keccak256(bytes))
			},
			"eth_getTransactionReceipt" if mined => json!({
				"transactionHash": params[0],
				"transactionIndex": "0x0",
				"blockHash": format!("0x{}", "11".repeat(32)),
				"blockNumber": "0x5",
				"from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
				"to": GAME,
				"cumulativeGasUsed": "0x5208",
				"gasUsed": "0x5208",
				"effectiveGasPrice": "0x3b9aca00",
				"contractAddress": null,
				"logs": [],
				"logsBloom": format!("0x{}", "00".repeat(256)),
				"status": "0x1",
				"type": "0x0"
			}),
			_ => Value::Null,
		}
	}

	fn rpc_response(request: &Value, mined: bool) -> Value {
		let method = request["method"].as_str().unwrap_or_default();
		json!({
			"jsonrpc": "2.0",
			"id": request["id"],
			"result": rpc_result(method, &request["params"], mined),
		})
	}

	/// Serves JSON-RPC over HTTP/1.1 keep-alive on one connection.
	async fn serve_connection(stream: TcpStream, mined: bool) {
		let mut reader = BufReader::new(stream);
		loop {
			let mut line = String::new();
			if reader.read_line(&mut line).await.unwrap_or(0) == 0 {
				return;
			}

			let mut content_length = 0;
			loop {
				line.clear();
				if reader.read_line(&mut line).await.unwrap_or(0) == 0 {
					return;
				}
				if line == "\r\n" {
					break;
				}
				if let Some((name, value)) = line.split_once(':') {
					if name.eq_ignore_ascii_case("content-length") {
						content_length = value.trim().parse().unwrap_or(0);
					}
				}
			}

			let mut body = vec![0u8; content_length];
			if reader.read_exact(&mut body).await.is_err() {
				return;
			}

			let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
			let response = match &request {
				Value::Array(batch) => {
					Value::Array(batch.iter().map(|r| rpc_response(r, mined)).collect())
				},
				single => rpc_response(single, mined),
			};
			let payload = serde_json::to_vec(&response).unwrap();
			let head = format!(
				"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n",
				payload.len()
			);

			let stream = reader.get_mut();
			if stream.write_all(head.as_bytes()).await.is_err()
				|| stream.write_all(&payload).await.is_err()
			{
				return;
			}
		}
	}

	/// Starts a local JSON-RPC node and returns its URL.
	async fn spawn_node(mined: bool) -> String {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		tokio::spawn(async move {
			while let Ok((stream, _)) = listener.accept().await {
				tokio::spawn(serve_connection(stream, mined));
			}
		});
		format!("http://{}", addr)
	}

	fn create_test_signer() -> PrivateKeySigner {
		"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
			.parse()
			.unwrap()
	}

	#[tokio::test]
	async fn test_alloy_delivery_new_success() {
		let delivery = AlloyDelivery::new(
			"http://localhost:8545",
			create_test_signer(),
			Duration::from_secs(120),
		)
		.unwrap();
		assert_eq!(delivery.receipt_timeout, Duration::from_secs(120));
	}

	#[tokio::test]
	async fn test_alloy_delivery_invalid_url() {
		let result = AlloyDelivery::new("not a url", create_test_signer(), Duration::from_secs(1));

		match result {
			Err(DeliveryError::Network(msg)) => assert!(msg.contains("Invalid RPC URL")),
			_ => panic!("expected invalid URL error"),
		}
	}

	#[tokio::test]
	async fn test_unreachable_endpoint_reports_network_error() {
		let delivery = AlloyDelivery::new(
			"http://127.0.0.1:1",
			create_test_signer(),
			Duration::from_secs(1),
		)
		.unwrap();

		let result = delivery.chain_id().await;
		assert!(matches!(result, Err(DeliveryError::Network(_))));
	}

	#[tokio::test]
	async fn test_reads_from_node() {
		let url = spawn_node(true).await;
		let delivery =
			AlloyDelivery::new(&url, create_test_signer(), Duration::from_secs(5)).unwrap();

		assert_eq!(delivery.chain_id().await.unwrap(), 31337);

		let operator: Address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap();
		assert_eq!(delivery.get_nonce(operator).await.unwrap(), 9);

		let game: Address = GAME.parse().unwrap();
		let output = delivery
			.eth_call(Transaction::call(game, vec![0x36, 0x44, 0xe5, 0x15], 31337))
			.await
			.unwrap();
		assert_eq!(output.as_ref(), [0x07; 32].as_slice());
	}

	#[tokio::test]
	async fn test_submit_and_wait_for_mined_receipt() {
		let url = spawn_node(true).await;
		let delivery =
			AlloyDelivery::new(&url, create_test_signer(), Duration::from_secs(5)).unwrap();

		let tx = TransactionBuilder::new()
			.to(GAME.parse().unwrap())
			.data(vec![0xde, 0xad, 0xbe, 0xef])
			.chain_id(31337)
			.nonce(9)
			.gas_limit(500_000)
			.gas_price(Some(1_000_000_000))
			.try_build()
			.unwrap();

		let hash = delivery.submit(tx).await.unwrap();
		let receipt = delivery.wait_for_receipt(&hash).await.unwrap();

		assert_eq!(receipt.hash, hash);
		assert_eq!(receipt.block_number, 5);
		assert_eq!(receipt.gas_used, 21_000);
		assert!(receipt.success);
	}

	#[tokio::test]
	async fn test_wait_for_receipt_times_out() {
		let url = spawn_node(false).await;
		let delivery =
			AlloyDelivery::new(&url, create_test_signer(), Duration::from_secs(1)).unwrap();

		let hash = TransactionHash(B256::repeat_byte(0x42));
		match delivery.wait_for_receipt(&hash).await {
			Err(DeliveryError::ReceiptTimeout {
				hash: timed_out,
				seconds,
			}) => {
				assert_eq!(timed_out, hash);
				assert_eq!(seconds, 1);
			},
			other => panic!("expected receipt timeout, got {:?}", other),
		}
	}
}
