use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::codec::{encode_frame, FrameConfig, Message};
use crate::decoder::FrameDecoder;
use crate::error::FrameError;

/// `tokio_util` codec for UBX frames.
///
/// Link noise is expected on a serial line, so frames that fail the
/// checksum or overflow the payload capacity are logged and skipped instead
/// of terminating the stream.
#[derive(Debug, Default)]
pub struct UbxCodec {
    decoder: FrameDecoder,
}

impl UbxCodec {
    /// Create a codec with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with explicit configuration.
    pub fn with_config(config: FrameConfig) -> Self {
        Self {
            decoder: FrameDecoder::with_config(config),
        }
    }
}

impl Decoder for UbxCodec {
    type Item = Message;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let mut consumed = 0usize;
        let mut found = None;

        for &byte in src.iter() {
            consumed += 1;
            match self.decoder.feed(byte) {
                Ok(Some(message)) => {
                    found = Some(message);
                    break;
                }
                Ok(None) => {}
                Err(FrameError::ReceiveOverflow { .. }) if self.decoder.in_frame() => {}
                Err(err) => tracing::warn!(error = %err, "dropping invalid frame"),
            }
        }

        src.advance(consumed);
        Ok(found)
    }
}

impl Encoder<Message> for UbxCodec {
    type Error = FrameError;

    fn encode(&mut self, item: Message, dst: &mut BytesMut) -> Result<(), Self::Error> {
        encode_frame(&item, dst)
    }
}

impl Encoder<&Message> for UbxCodec {
    type Error = FrameError;

    fn encode(&mut self, item: &Message, dst: &mut BytesMut) -> Result<(), Self::Error> {
        encode_frame(item, dst)
    }
}

#[cfg(test)]
mod tests {
    use futures_util::{SinkExt, StreamExt};
    use tokio_util::codec::{FramedRead, FramedWrite};

    use super::*;
    use crate::codec::encode_to_vec;

    #[test]
    fn decode_skips_noise_and_bad_frames() {
        let mut wire = vec![0x00, 0xB5, 0x13];
        let mut bad = encode_to_vec(&Message::poll(0x06, 0x24)).unwrap();
        bad[7] ^= 0x01;
        wire.extend(bad);
        wire.extend(encode_to_vec(&Message::new(0x05, 0x01, vec![0x06, 0x24])).unwrap());

        let mut codec = UbxCodec::new();
        let mut buf = BytesMut::from(wire.as_slice());
        let msg = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!((msg.class, msg.id), (0x05, 0x01));
        assert!(buf.is_empty());
        assert!(codec.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn decode_partial_frame_waits_for_more() {
        let wire = encode_to_vec(&Message::poll(0x0A, 0x04)).unwrap();
        let mut codec = UbxCodec::new();

        let mut buf = BytesMut::from(&wire[..5]);
        assert!(codec.decode(&mut buf).unwrap().is_none());
        assert!(buf.is_empty());

        buf.extend_from_slice(&wire[5..]);
        let msg = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!((msg.class, msg.id), (0x0A, 0x04));
    }

    #[tokio::test]
    async fn framed_roundtrip_over_duplex() {
        let (left, right) = tokio::io::duplex(256);
        let mut writer = FramedWrite::new(left, UbxCodec::new());
        let mut reader = FramedRead::new(right, UbxCodec::new());

        writer
            .send(Message::new(0x06, 0x08, vec![0xE8, 0x03, 0x01, 0x00, 0x01, 0x00]))
            .await
            .unwrap();
        writer.send(Message::poll(0x0A, 0x04)).await.unwrap();

        let first = reader.next().await.unwrap().unwrap();
        let second = reader.next().await.unwrap().unwrap();
        assert_eq!((first.class, first.id, first.length), (0x06, 0x08, 6));
        assert_eq!((second.class, second.id, second.length), (0x0A, 0x04, 0));
    }
}
