//! Per-call identification metadata for the Bilibili gRPC API.
//!
//! Every outbound call must carry binary-encoded device, locale, account
//! and network messages, plus an `identify_v1` bearer token derived from
//! the access key. The values mirror the identity of the official Android
//! client.

use anyhow::{Context, Result};
use prost::Message;
use tonic::metadata::{Ascii, MetadataMap, MetadataValue};

use crate::proto::{Device, Locale, Metadata, Network, NetworkType};

const MOBI_APP: &str = "android";
const DEVICE: &str = "phone";
const BUILD: i32 = 6830300;
const CHANNEL: &str = "bili";
const BUVID: &str = "XX82B818F96FB2F312B3A1BA44DB41892FF99";
const PLATFORM: &str = "android";
const TIMEZONE: &str = "Asia/Shanghai";

/// Build the header set attached to every call. An empty access key is
/// accepted; the service then answers in unauthenticated mode.
pub fn build_headers(access_key: &str) -> Result<MetadataMap> {
    let device = Device {
        mobi_app: MOBI_APP.to_string(),
        device: DEVICE.to_string(),
        build: BUILD,
        channel: CHANNEL.to_string(),
        buvid: BUVID.to_string(),
        platform: PLATFORM.to_string(),
    };
    let locale = Locale {
        timezone: TIMEZONE.to_string(),
    };
    let metadata = Metadata {
        access_key: access_key.to_string(),
        mobi_app: MOBI_APP.to_string(),
        device: DEVICE.to_string(),
        build: BUILD,
        channel: CHANNEL.to_string(),
        buvid: BUVID.to_string(),
        platform: PLATFORM.to_string(),
    };
    let network = Network {
        r#type: NetworkType::Wifi as i32,
    };

    let mut map = MetadataMap::new();
    map.insert_bin(
        "x-bili-device-bin",
        MetadataValue::from_bytes(&device.encode_to_vec()),
    );
    map.insert_bin(
        "x-bili-local-bin",
        MetadataValue::from_bytes(&locale.encode_to_vec()),
    );
    map.insert_bin(
        "x-bili-metadata-bin",
        MetadataValue::from_bytes(&metadata.encode_to_vec()),
    );
    map.insert_bin(
        "x-bili-network-bin",
        MetadataValue::from_bytes(&network.encode_to_vec()),
    );

    let token: MetadataValue<Ascii> = format!("identify_v1 {access_key}")
        .parse()
        .context("access key is not a valid header value")?;
    map.insert("authorization", token);

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_all_binary_keys_and_the_token() {
        let map = build_headers("").unwrap();
        for key in [
            "x-bili-device-bin",
            "x-bili-local-bin",
            "x-bili-metadata-bin",
            "x-bili-network-bin",
        ] {
            assert!(map.get_bin(key).is_some(), "missing {key}");
        }
        assert_eq!(
            map.get("authorization").unwrap().to_str().unwrap(),
            "identify_v1 "
        );
    }

    #[test]
    fn access_key_flows_into_token_and_metadata() {
        let map = build_headers("abc123").unwrap();
        assert_eq!(
            map.get("authorization").unwrap().to_str().unwrap(),
            "identify_v1 abc123"
        );

        let bytes = map
            .get_bin("x-bili-metadata-bin")
            .unwrap()
            .to_bytes()
            .unwrap();
        let metadata = Metadata::decode(bytes).unwrap();
        assert_eq!(metadata.access_key, "abc123");
        assert_eq!(metadata.mobi_app, "android");
        assert_eq!(metadata.build, 6830300);
    }

    #[test]
    fn device_identity_matches_the_android_client() {
        let map = build_headers("").unwrap();
        let bytes = map
            .get_bin("x-bili-device-bin")
            .unwrap()
            .to_bytes()
            .unwrap();
        let device = Device::decode(bytes).unwrap();
        assert_eq!(device.platform, "android");
        assert_eq!(device.device, "phone");
        assert_eq!(device.channel, "bili");
    }
}
