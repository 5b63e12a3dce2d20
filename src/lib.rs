pub mod configuration;

pub mod error;

pub mod function {
    pub mod sample;
    pub mod evaluable;
    pub mod tabulatedfunction;
    pub mod arraytabulatedfunction;
    pub mod linkedlisttabulatedfunction;
    pub mod tabulatedfunctions;
}

pub mod codec {
    pub mod binaryformat;
    pub mod textformat;
    pub mod tabulatedfunctioncodec;
}
