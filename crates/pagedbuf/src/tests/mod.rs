mod arbitrary;
mod property_codec;
mod property_edits;
