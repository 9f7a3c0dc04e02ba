use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use titan_message::formats::text::FULL_WIDTH_TO_ASCII;
use titan_message::prelude::*;

/// Message binary with the given `(id, string bytes)` slots; empty bytes make an empty slot
fn message_binary(valid_count: u32, slots: &[(u32, &[u8])]) -> Vec<u8> {
    let mut data = vec![0u8; 0x20];
    data[0x04..0x08].copy_from_slice(b"MSG2");
    data[0x08..0x0C].copy_from_slice(&0x10000u32.to_le_bytes());
    data[0x10..0x14].copy_from_slice(&valid_count.to_le_bytes());
    data[0x14..0x18].copy_from_slice(&0x20u32.to_le_bytes());

    let mut offset = 0x20 + slots.len() * 0x10;
    let mut strings = Vec::new();
    for &(id, text) in slots {
        let (len, at) = if text.is_empty() { (0, 0) } else { (text.len(), offset) };
        for field in [id, len as u32, at as u32, 0] {
            data.extend_from_slice(&field.to_le_bytes());
        }
        offset += text.len();
        strings.extend_from_slice(text);
    }
    data.extend_from_slice(&strings);

    let empty = slots.iter().filter(|s| s.1.is_empty()).count();
    let size = (data.len() - 0x10 * empty) as u32;
    data[0x0C..0x10].copy_from_slice(&size.to_le_bytes());
    data
}

const NAME_TABLE: [u8; 7] = [0x01, 0x00, 0x03, 0x00, 0x82, 0xA0, 0x00];

#[test]
fn test_charset_round_trip() {
    let codec = TextCodec::default();
    for (_, ascii) in FULL_WIDTH_TO_ASCII {
        let bytes = codec.encode_char(ascii);
        assert_eq!(bytes.len(), 2, "{ascii:?} should encode as a double-byte character");
        assert_eq!(codec.decode_char([bytes[0], bytes[1]]), ascii);
    }
}

#[test]
fn test_control_code_round_trip() {
    let codec = TextCodec::default();
    let text = "[Color:0003]Guild [Guild] sighted [Enemy1:0012]!\n\
                [Item:0100] x[Count:0002][Color:0000]\n\
                [Page]\n\nAt [Location], take [Quest].";
    assert_eq!(codec.decode(&codec.encode(text)), text);

    for code in ControlCode::ALL {
        let token = match code.arity() {
            titan_message::formats::text::Arity::One => format!("[{}:0042]", code.name()),
            titan_message::formats::text::Arity::None => format!("[{}]", code.name()),
        };
        assert_eq!(codec.decode(&codec.encode(&token)), token);
    }
}

#[test]
fn test_bracket_fallback() {
    let codec = TextCodec::default();
    let encoded = codec.encode("A[unknownToken]B");
    assert_eq!(&encoded[2..4], &[0x81, 0x6D]);
    assert_eq!(codec.decode(&encoded), "A[unknownToken]B");
}

#[test]
fn test_page_break() {
    let codec = TextCodec::default();
    assert_eq!(codec.decode(&[0xF8, 0x02]), "[Page]\n\n");
    assert_eq!(codec.encode("[Page]\n\n"), vec![0xF8, 0x02]);
    assert_eq!(codec.encode("[Page]\r\n\r\n"), vec![0xF8, 0x02]);
}

#[test]
fn test_message_binary_sentinel() {
    let codec = TextCodec::default();
    let data = message_binary(2, &[(1, &[0x82, 0xA0, 0x82, 0xA2]), (2, &[])]);

    let translation = import_message_binary(&data, "Event/msg.mbm", &codec).unwrap();
    assert_eq!(translation.len(), 2);
    assert_eq!(translation.entries[0].id, 1);
    assert_eq!(translation.entries[0].original.chars().count(), 2);
    assert_eq!(translation.entries[1].id, PLACEHOLDER_ID);

    let exported = export_message_binary(&translation, &codec).unwrap();
    let reimported = import_message_binary(&exported, "Event/msg.mbm", &codec).unwrap();
    assert_eq!(reimported.entries[0], translation.entries[0]);
    // Header now counts one valid message, so the trailing empty slot is not revisited
    assert_eq!(reimported.len(), 1);
    assert_eq!(&exported[0x30..0x40], &[0u8; 16]);
}

#[test]
fn test_message_binary_structural_round_trip() {
    let codec = TextCodec::default();
    let data = message_binary(
        2,
        &[
            (4, &[0xF8, 0x04, 0x03, 0x00, 0x82, 0xA0, 0xFF, 0xFF]),
            (0, &[]),
            (6, &[0x82, 0xA2, 0xF8, 0x01, 0x82, 0xA4, 0xFF, 0xFF]),
        ],
    );

    let translation = import_message_binary(&data, "m.mbm", &codec).unwrap();
    assert_eq!(translation.placeholder_count(), 1);
    assert!(translation.entries[1].is_placeholder());
    assert_eq!(export_message_binary(&translation, &codec).unwrap(), data);
}

#[test]
fn test_message_binary_format_mismatch() {
    let mut data = message_binary(0, &[]);
    data[0x04..0x08].copy_from_slice(b"MSG3");
    let err = import_message_binary(&data, "m.mbm", &TextCodec::default()).unwrap_err();
    assert!(err.is_format_mismatch());
}

#[test]
fn test_message_binary_truncated() {
    let mut data = message_binary(1, &[(1, &[0x82, 0xA0, 0xFF, 0xFF])]);
    data.truncate(0x28);
    let err = import_message_binary(&data, "m.mbm", &TextCodec::default()).unwrap_err();
    assert!(matches!(err, Error::TruncatedInput { .. }));
    assert!(!err.is_format_mismatch());
}

#[test]
fn test_string_table_sentinel() {
    let codec = TextCodec::default();
    let translation = import_string_table(&NAME_TABLE, "nametable.tbl", &codec).unwrap();
    assert_eq!(translation.kind, TranslationKind::StringTable);
    assert_eq!(translation.entries, vec![TranslatableEntry::new(0, "あ")]);
    assert_eq!(export_string_table(&translation, &codec).unwrap(), NAME_TABLE);
}

#[test]
fn test_string_table_round_trip() {
    let codec = TextCodec::default();
    // "Ａ", "", "あい" with cumulative end offsets 3, 4, 9
    let data = [
        0x03, 0x00, 0x03, 0x00, 0x04, 0x00, 0x09, 0x00, 0x82, 0x60, 0x00, 0x00, 0x82, 0xA0, 0x82,
        0xA2, 0x00,
    ];
    let translation = import_string_table(&data, "t.tbl", &codec).unwrap();
    assert_eq!(translation.entries[0].original, "A");
    assert_eq!(translation.entries[1].original, "");
    assert_eq!(translation.entries[2].id, 2);
    assert_eq!(export_string_table(&translation, &codec).unwrap(), data);
}

#[test]
fn test_overrides_precedence() {
    let overrides = CharOverrides::from_json_str(r#"{"Ａ": "ä"}"#).unwrap();
    let codec = TextCodec::new(overrides);
    assert_eq!(codec.decode(&[0x82, 0x60, 0x82, 0x61]), "äB");
    assert_eq!(codec.encode("ä"), vec![0x82, 0x60]);
}

#[test]
fn test_legacy_json_is_accepted() {
    let json = r#"{
        "FileType": "MessageBinary",
        "RelativePath": "Event\\msg.mbm",
        "Entries": [
            { "ID": 3, "Original": "Hi", "Translation": "Hallo", "Notes": "" },
            { "ID": -1, "Original": "", "Translation": "", "Notes": "" }
        ]
    }"#;
    let translation = Translation::from_json(json).unwrap();
    assert_eq!(translation.kind, TranslationKind::MessageBinary);
    assert_eq!(translation.placeholder_count(), 1);
    assert_eq!(translation.translated_count(), 1);

    let temp = tempdir().unwrap();
    let source = temp.path().join("msg.json");
    fs::write(&source, json).unwrap();
    let dest = convert_json_to_binary(&source, &temp.path().join("out"), &TextCodec::default()).unwrap();
    assert_eq!(dest, temp.path().join("out").join("Event").join("msg.mbm"));

    let data = fs::read(dest).unwrap();
    let rebuilt = import_message_binary(&data, "Event/msg.mbm", &TextCodec::default()).unwrap();
    assert_eq!(rebuilt.entries[0].original, "Hallo");
}

fn write_file(root: &Path, relative: &str, data: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, data).unwrap();
}

#[test]
fn test_batch_round_trip_with_filter() {
    let temp = tempdir().unwrap();
    let romfs = temp.path().join("romfs");
    let mbm = message_binary(1, &[(1, &[0x82, 0xA0, 0xFF, 0xFF])]);

    write_file(&romfs, "Event/msg_001.mbm", &mbm);
    write_file(&romfs, "Item/itemnametable.tbl", &NAME_TABLE);
    write_file(&romfs, "Item/itemdata.tbl", &NAME_TABLE);
    write_file(&romfs, "TestData/msg_test.mbm", &mbm);
    write_file(&romfs, "Event/seamap.mbm", &mbm);

    let codec = TextCodec::default();
    let options = BatchOptions::default();
    let json = temp.path().join("json");

    let result = batch_binary_to_json(&romfs, &json, &codec, &options, |_, _, _| {}).unwrap();
    assert_eq!(result.converted, 2);
    assert!(json.join("Event").join("msg_001.json").exists());
    assert!(json.join("Item").join("itemnametable.json").exists());
    assert!(!json.join("Item").join("itemdata.json").exists());
    assert!(!json.join("TestData").exists());

    let record = read_translation(json.join("Item").join("itemnametable.json")).unwrap();
    assert_eq!(record.relative_path, "Item/itemnametable.tbl");

    let out = temp.path().join("out");
    let result = batch_json_to_binary(&json, &out, &codec, &options, |_, _, _| {}).unwrap();
    assert_eq!(result.converted, 2);
    assert_eq!(fs::read(out.join("Event").join("msg_001.mbm")).unwrap(), mbm);
    assert_eq!(fs::read(out.join("Item").join("itemnametable.tbl")).unwrap(), NAME_TABLE);
}

#[test]
fn test_batch_all_filter() {
    let temp = tempdir().unwrap();
    let romfs = temp.path().join("romfs");
    write_file(&romfs, "Item/itemdata.tbl", &NAME_TABLE);
    write_file(&romfs, "TestData/seanames.tbl", &NAME_TABLE);

    let files = find_binary_files(&romfs, &BinaryFilter::all()).unwrap();
    assert_eq!(files.len(), 2);
    assert!(find_binary_files(&romfs, &BinaryFilter::default()).unwrap().is_empty());
}

#[test]
fn test_batch_skips_existing_outputs() {
    let temp = tempdir().unwrap();
    let romfs = temp.path().join("romfs");
    write_file(&romfs, "nametable.tbl", &NAME_TABLE);

    let json = temp.path().join("json");
    write_file(&json, "nametable.json", b"keep me");

    let codec = TextCodec::default();
    let mut options = BatchOptions::default();
    let result = batch_binary_to_json(&romfs, &json, &codec, &options, |_, _, _| {}).unwrap();
    assert_eq!((result.converted, result.skipped), (0, 1));
    assert_eq!(fs::read(json.join("nametable.json")).unwrap(), b"keep me");

    options.overwrite = true;
    let result = batch_binary_to_json(&romfs, &json, &codec, &options, |_, _, _| {}).unwrap();
    assert_eq!((result.converted, result.skipped), (1, 0));
    assert!(read_translation(json.join("nametable.json")).is_ok());
}

#[test]
fn test_batch_error_policy() {
    let temp = tempdir().unwrap();
    let romfs = temp.path().join("romfs");
    write_file(&romfs, "a_broken.mbm", b"not a message binary");
    write_file(&romfs, "b_nametable.tbl", &NAME_TABLE);

    let codec = TextCodec::default();
    let json = temp.path().join("json");

    let err = batch_binary_to_json(&romfs, &json, &codec, &BatchOptions::default(), |_, _, _| {})
        .unwrap_err();
    assert!(err.is_format_mismatch());
    assert!(!json.join("b_nametable.json").exists());

    let options = BatchOptions {
        error_policy: ErrorPolicy::Skip,
        ..BatchOptions::default()
    };
    let progress = std::cell::RefCell::new(Vec::new());
    let result = batch_binary_to_json(&romfs, &json, &codec, &options, |current, total, name| {
        progress.borrow_mut().push((current, total, name.to_string()));
    })
    .unwrap();
    assert_eq!((result.converted, result.failed), (1, 1));
    assert!(json.join("b_nametable.json").exists());
    assert_eq!(
        progress.into_inner(),
        vec![
            (1, 2, "a_broken.mbm".to_string()),
            (2, 2, "b_nametable.tbl".to_string())
        ]
    );
}
