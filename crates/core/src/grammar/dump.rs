use super::descriptor::ModeDescriptor;

/// Serialize a descriptor to a pretty-printed JSON string.
pub fn to_pretty_json(descriptor: &ModeDescriptor) -> serde_json::Result<String> {
    serde_json::to_string_pretty(descriptor)
}
