use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use loblolly_yield::{
    config::FiaConfig,
    error::YieldError,
    fia::{response_records, FiaClient},
};

/// Serve exactly one canned HTTP response on a local port. The join handle
/// yields the raw request that was received.
fn serve_once(status_line: &'static str, body: &'static str) -> (FiaClient, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        String::from_utf8_lossy(&request).into_owned()
    });

    let config = FiaConfig {
        base_url: format!("http://{addr}/Evalidator/rest/Evalidator"),
        timeout_secs: 10,
    };
    (FiaClient::from_config(&config).unwrap(), handle)
}

const EVALGRP_BODY: &str = r#"{"EVALIDatorOutput":{"row":[{"EVAL_GRP":482018,"EVAL_GRP_DESCR":"TEXAS 2018"}]}}"#;

const REFTABLE_BODY: &str = r#"{"FIADB_SQL_Output":{"record":[{"COUNTYCD":347,"PLOT":1},{"COUNTYCD":347,"PLOT":7}]}}"#;

// --- evalgrp ---

#[test]
fn test_eval_group_request_success() {
    let (client, server) = serve_once("HTTP/1.1 200 OK", EVALGRP_BODY);

    let value = client.eval_group_request(48).unwrap().unwrap();
    assert_eq!(value["EVALIDatorOutput"]["row"][0]["EVAL_GRP"], 482018);

    let request = server.join().unwrap();
    let request_line = request.lines().next().unwrap();
    assert!(request_line.starts_with("GET /Evalidator/rest/Evalidator/evalgrp?"));
    assert!(request_line.contains("schemaName=FS_FIADB"));
    assert!(request_line.contains("whereClause=statecd%3D48"));
    assert!(request_line.contains("mostRecent=Y"));
}

#[test]
fn test_non_200_is_null_result() {
    let (client, server) = serve_once("HTTP/1.1 404 Not Found", "");
    assert!(client.eval_group_request(48).unwrap().is_none());
    server.join().unwrap();
}

#[test]
fn test_server_error_is_null_result() {
    let (client, server) = serve_once("HTTP/1.1 500 Internal Server Error", "{}");
    assert!(client.eval_group_request(13).unwrap().is_none());
    server.join().unwrap();
}

// --- refTable ---

#[test]
fn test_ref_table_request_success() {
    let (client, server) = serve_once("HTTP/1.1 200 OK", REFTABLE_BODY);

    let value = client
        .ref_table_request("COND", "COUNTYCD, PLOT", "COUNTYCD=347 AND INVYR=2018")
        .unwrap()
        .unwrap();
    let records = response_records(&value);
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["PLOT"], 7);

    let request = server.join().unwrap();
    let request_line = request.lines().next().unwrap();
    assert!(request_line.starts_with("GET /Evalidator/rest/Evalidator/refTable?"));
    assert!(request_line.contains("tableName=COND"));
    assert!(request_line.contains("colList=COUNTYCD%2C+PLOT"));
    assert!(request_line.contains("whereStr=COUNTYCD%3D347+AND+INVYR%3D2018"));
    assert!(request_line.contains("outputFormat=JSON"));
}

#[test]
fn test_malformed_body_is_json_error() {
    let (client, server) = serve_once("HTTP/1.1 200 OK", "<html>maintenance</html>");
    let err = client
        .ref_table_request("PLOT", "PLOT", "STATECD=48")
        .unwrap_err();
    assert!(matches!(err, YieldError::Json(_)));
    server.join().unwrap();
}

#[test]
fn test_unreachable_host_is_http_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = FiaConfig {
        base_url: format!("http://{addr}/"),
        timeout_secs: 5,
    };
    let client = FiaClient::from_config(&config).unwrap();
    let err = client.eval_group_request(48).unwrap_err();
    assert!(matches!(err, YieldError::Http(_)));
}
