use std::io::{Read, Write};

use transparent_substitution::{Atbash, BufWriter, Caesar, Keyed, Reader, Rot13, Writer};

fn data() -> Vec<u8> {
    (0..=u8::MAX).cycle().take(16384).collect()
}

#[test]
fn writer_and_reader_are_invertible() -> Result<(), Box<dyn std::error::Error>> {
    let data = data();
    let keyed = Keyed::new("QWERTYUIOPASDFGHJKLZXCVBNM")?;

    let mut buffer = vec![];
    {
        let mut substituting_writer = Writer::<_, _, 4096>::new(&mut buffer, keyed);
        substituting_writer.write_all(&data)?;
        substituting_writer.flush()?;
    }
    assert_ne!(buffer, data);

    let mut substituting_reader = Reader::new(&*buffer, keyed.inverse());
    let mut output = vec![];
    substituting_reader.read_to_end(&mut output)?;
    assert_eq!(output, data);

    Ok(())
}

#[test]
fn writer_and_reader_agree() -> Result<(), Box<dyn std::error::Error>> {
    let data = data();

    let mut written = vec![];
    {
        let mut writer = BufWriter::new(&mut written, Caesar::new(5));
        writer.write_all(&data)?;
        writer.flush()?;
    }

    let mut read = vec![];
    Reader::new(&*data, Caesar::new(5)).read_to_end(&mut read)?;

    assert_eq!(written, read);
    Ok(())
}

#[test]
fn involutions_undo_themselves() -> Result<(), Box<dyn std::error::Error>> {
    let data = data();

    let mut output = vec![];
    Reader::rot13(Reader::rot13(&*data)).read_to_end(&mut output)?;
    assert_eq!(output, data);

    output.clear();
    Reader::atbash(Reader::atbash(&*data)).read_to_end(&mut output)?;
    assert_eq!(output, data);

    output.clear();
    let mut writer = BufWriter::new(&mut output, Rot13);
    writer.write_all(&data)?;
    writer.flush()?;
    let mut writer = BufWriter::new(Vec::new(), Rot13);
    writer.write_all(&output)?;
    writer.flush()?;
    assert_eq!(writer.get_ref(), &data);

    let mut atbash_twice = vec![];
    Reader::new(Reader::new(&*data, Atbash), Atbash).read_to_end(&mut atbash_twice)?;
    assert_eq!(atbash_twice, data);

    Ok(())
}
