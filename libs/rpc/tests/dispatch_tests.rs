use std::net::SocketAddr;
use std::time::Duration;

use subledger_rpc::channel::Channel;
use subledger_rpc::codec::BincodeCodec;
use subledger_rpc::transport::TcpTransportListener;
use subledger_rpc::wire::{PeerRequest, PeerResponse};
use subledger_rpc::{Connection, Endpoint, Error, RpcBuilder, ScopeManager, SecurityPolicy};
use tokio::sync::mpsc;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Spawn a stub peer that serves one connection, answers with the canned
/// replies in order, and forwards every received request to the returned
/// channel. Once the replies run out it holds the connection open.
async fn stub_peer(
    replies: Vec<PeerResponse>,
) -> (SocketAddr, mpsc::UnboundedReceiver<PeerRequest>) {
    let listener = TcpTransportListener::bind("127.0.0.1:0".parse().unwrap())
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    let (seen, requests) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let (transport, _addr) = listener.accept().await.unwrap();
        let mut channel = Channel::from_transport(transport, BincodeCodec);

        for reply in replies {
            let request: PeerRequest = match channel.receive().await {
                Ok(request) => request,
                Err(_) => return,
            };
            let _ = seen.send(request);
            channel.send(&reply).await.unwrap();
        }

        // Keep the connection open so further calls block instead of failing.
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    (addr, requests)
}

async fn connect(addr: SocketAddr) -> Connection {
    Connection::connect(&Endpoint::Tcp(addr)).await.unwrap()
}

#[tokio::test]
async fn fire_returns_peer_message_as_text() {
    let (addr, mut requests) = stub_peer(vec![PeerResponse::Success {
        msg: b"OK".to_vec(),
    }])
    .await;
    let conn = connect(addr).await;

    let builder = RpcBuilder {
        chaincode_name: "ledger".to_string(),
        function: "transfer".to_string(),
        security: None,
        conn: &conn,
        scope: None,
    };

    let msg = builder
        .fire(&strings(&["alice", "bob", "10"]))
        .await
        .unwrap();
    assert_eq!(msg, "OK");

    match requests.recv().await.unwrap() {
        PeerRequest::Invoke(spec) => {
            let expected: Vec<Vec<u8>> = vec![
                b"transfer".to_vec(),
                b"alice".to_vec(),
                b"bob".to_vec(),
                b"10".to_vec(),
            ];
            assert_eq!(spec.chaincode_spec.input.args, expected);
            assert_eq!(spec.chaincode_spec.attributes, Some(Vec::new()));
        }
        other => panic!("expected an invoke, got {other:?}"),
    }
}

#[tokio::test]
async fn query_returns_raw_payload() {
    let payload = vec![0u8, 159, 146, 150];
    let (addr, mut requests) = stub_peer(vec![PeerResponse::Success {
        msg: payload.clone(),
    }])
    .await;
    let conn = connect(addr).await;

    let builder = RpcBuilder {
        chaincode_name: "ledger".to_string(),
        function: String::new(),
        security: None,
        conn: &conn,
        scope: None,
    };

    let bytes = builder.query(&strings(&["get", "key1"])).await.unwrap();
    assert_eq!(bytes, payload);

    match requests.recv().await.unwrap() {
        PeerRequest::Query(spec) => {
            // Empty function name: nothing is prepended.
            let expected: Vec<Vec<u8>> = vec![b"get".to_vec(), b"key1".to_vec()];
            assert_eq!(spec.chaincode_spec.input.args, expected);
        }
        other => panic!("expected a query, got {other:?}"),
    }
}

#[tokio::test]
async fn remote_failure_passes_through_verbatim() {
    let (addr, _requests) = stub_peer(vec![PeerResponse::Failure {
        message: "chaincode ledger not found".to_string(),
    }])
    .await;
    let conn = connect(addr).await;

    let builder = RpcBuilder {
        chaincode_name: "ledger".to_string(),
        function: String::new(),
        security: None,
        conn: &conn,
        scope: None,
    };

    let err = builder.query(&strings(&["get"])).await.unwrap_err();
    match err {
        Error::Remote(message) => assert_eq!(message, "chaincode ledger not found"),
        other => panic!("expected a remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn security_policy_reaches_the_wire() {
    let (addr, mut requests) = stub_peer(vec![PeerResponse::Success { msg: Vec::new() }]).await;
    let conn = connect(addr).await;

    let policy = SecurityPolicy {
        user: "alice".to_string(),
        attributes: Some(strings(&["admin", "auditor"])),
        metadata: b"extra".to_vec(),
        custom_id_gen_alg: "sha256".to_string(),
    };
    let builder = RpcBuilder {
        chaincode_name: "ledger".to_string(),
        function: "set".to_string(),
        security: Some(&policy),
        conn: &conn,
        scope: None,
    };

    builder.fire(&strings(&["key1", "v"])).await.unwrap();

    match requests.recv().await.unwrap() {
        PeerRequest::Invoke(spec) => {
            let cc = &spec.chaincode_spec;
            assert_eq!(cc.secure_context, Some("alice".to_string()));
            assert_eq!(cc.attributes, Some(strings(&["admin", "auditor"])));
            assert_eq!(cc.metadata, Some(b"extra".to_vec()));
            assert_eq!(spec.id_generation_alg, Some("sha256".to_string()));
        }
        other => panic!("expected an invoke, got {other:?}"),
    }
}

#[tokio::test]
async fn builder_is_reusable_across_calls() {
    let (addr, _requests) = stub_peer(vec![
        PeerResponse::Success { msg: b"1".to_vec() },
        PeerResponse::Success { msg: b"2".to_vec() },
    ])
    .await;
    let conn = connect(addr).await;

    let builder = RpcBuilder {
        chaincode_name: "ledger".to_string(),
        function: String::new(),
        security: None,
        conn: &conn,
        scope: None,
    };

    assert_eq!(builder.query(&strings(&["get", "a"])).await.unwrap(), b"1");
    assert_eq!(builder.query(&strings(&["get", "b"])).await.unwrap(), b"2");
}

#[tokio::test]
async fn concurrent_dispatches_share_one_connection() {
    let (addr, _requests) = stub_peer(vec![
        PeerResponse::Success { msg: b"x".to_vec() },
        PeerResponse::Success { msg: b"x".to_vec() },
    ])
    .await;
    let conn = connect(addr).await;

    let first = RpcBuilder {
        chaincode_name: "ledger".to_string(),
        function: String::new(),
        security: None,
        conn: &conn,
        scope: None,
    };
    let second = RpcBuilder {
        chaincode_name: "assets".to_string(),
        function: String::new(),
        security: None,
        conn: &conn,
        scope: None,
    };

    let first_args = strings(&["get", "a"]);
    let second_args = strings(&["get", "b"]);
    let (a, b) = tokio::join!(
        first.query(&first_args),
        second.query(&second_args),
    );
    assert_eq!(a.unwrap(), b"x");
    assert_eq!(b.unwrap(), b"x");
}

#[tokio::test]
async fn pre_cancelled_scope_fails_immediately() {
    // No canned replies: the stub would block any call that actually went out.
    let (addr, _requests) = stub_peer(Vec::new()).await;
    let conn = connect(addr).await;

    let scope = ScopeManager::new();
    scope.cancel();

    let builder = RpcBuilder {
        chaincode_name: "ledger".to_string(),
        function: "transfer".to_string(),
        security: None,
        conn: &conn,
        scope: Some(&scope),
    };

    let result = tokio::time::timeout(
        Duration::from_secs(1),
        builder.fire(&strings(&["alice", "bob", "10"])),
    )
    .await
    .expect("a cancelled scope must not block the call");

    assert!(matches!(result.unwrap_err(), Error::Cancelled));
}

#[tokio::test]
async fn firing_the_trigger_releases_an_in_flight_call() {
    let (addr, _requests) = stub_peer(Vec::new()).await;
    let conn = connect(addr).await;

    let scope = ScopeManager::new();
    let trigger = scope.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let builder = RpcBuilder {
        chaincode_name: "ledger".to_string(),
        function: String::new(),
        security: None,
        conn: &conn,
        scope: Some(&scope),
    };

    let err = builder.query(&strings(&["get", "key1"])).await.unwrap_err();
    assert!(matches!(err, Error::Cancelled));
}
